use thiserror::Error;

/// Separator between URI segments.
pub const SEGMENT_DELIMITER: char = '.';
/// Source, dataset, version and date tags precede the classification path.
pub const ENVELOPE_SEGMENTS: usize = 4;
/// Envelope plus at least one classification segment.
pub const MIN_SEGMENTS: usize = ENVELOPE_SEGMENTS + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("expected at least {MIN_SEGMENTS} dot-separated segments, found {found}")]
    TooFewSegments { found: usize },
}

/// The fixed four-segment head of a classification URI. Parsed but not
/// used for tree placement.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub source: String,
    pub dataset: String,
    pub version: String,
    pub date: String,
}

/// A parsed classification URI, e.g.
/// `hoche.2025_job_roles.V1/0.2025/01/01.111.Sector1`.
///
/// Path segments are kept verbatim: no trimming, case folding or dedup, and
/// empty segments are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationUri {
    #[allow(dead_code)]
    pub envelope: Envelope,
    pub path: Vec<String>,
}

impl ClassificationUri {
    pub fn parse(uri: &str) -> Result<Self, UriError> {
        let segments: Vec<&str> = uri.split(SEGMENT_DELIMITER).collect();
        if segments.len() < MIN_SEGMENTS {
            return Err(UriError::TooFewSegments {
                found: segments.len(),
            });
        }

        let envelope = Envelope {
            source: segments[0].to_string(),
            dataset: segments[1].to_string(),
            version: segments[2].to_string(),
            date: segments[3].to_string(),
        };
        let path = segments[ENVELOPE_SEGMENTS..]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(ClassificationUri { envelope, path })
    }
}
