// Prompt templates for job-role classification.

/// Classification prompt. Replace `{prefix}`, `{industries}` and `{job_role}` before sending.
pub const CLASSIFY_PROMPT_TEMPLATE: &str = "\
OpenHoche is an open hierarchical object classification and heuristics engine. \
It uses URIs of the form:
{prefix}.<NAICS industry>.<sector>.<service/subsector>...

The following are valid NAICS industries:
{industries}

Job roles are specific to the USA. Please classify the following job role by \
returning a URI that fits the above framework. Avoid unnecessary duplication in higher-level \
segments while allowing lower-level duplication if needed.

Job Role: {job_role}
";
