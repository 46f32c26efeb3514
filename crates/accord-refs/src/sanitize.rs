/// Map a reference string to a single filesystem-safe path component.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`. Base58 payloads pass
/// through untouched, so distinct content references stay distinct on
/// disk.
pub fn sanitize(reference: &str) -> String {
    reference
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
