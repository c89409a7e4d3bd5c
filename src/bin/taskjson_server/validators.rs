use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::*;

/// Ids become file names in the data dir.
pub(super) fn validate_doc_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(anyhow::anyhow!("{} cannot be empty", kind));
    }
    if id.starts_with('.') {
        return Err(anyhow::anyhow!("{} cannot start with '.'", kind));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(anyhow::anyhow!("{} must be alnum or '-', '_', '.'", kind));
    }
    Ok(())
}

pub(super) fn validate_timestamp(field: &str, value: &str) -> Result<()> {
    OffsetDateTime::parse(value, &Rfc3339)
        .with_context(|| format!("{} must be an RFC 3339 timestamp", field))?;
    Ok(())
}

pub(super) fn parse_json_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| bad_request(anyhow::Error::new(e)))
}
