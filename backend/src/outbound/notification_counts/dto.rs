//! Wire shape of the count endpoint.

use serde::Deserialize;

/// `{"count": <n>}`; extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct PendingCountDto {
    pub(super) count: u64,
}

/// Decode a count body.
///
/// Anything other than an object holding a non-negative integer `count`
/// is rejected with serde's description of the mismatch.
pub(super) fn decode_count(body: &[u8]) -> Result<u64, String> {
    serde_json::from_slice::<PendingCountDto>(body)
        .map(|dto| dto.count)
        .map_err(|error| format!("invalid count payload: {error}"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for count decoding.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(br#"{"count": 0}"#.as_slice(), 0)]
    #[case(br#"{"count": 150, "extra": true}"#.as_slice(), 150)]
    fn accepts_numeric_counts(#[case] body: &[u8], #[case] expected: u64) {
        assert_eq!(decode_count(body), Ok(expected));
    }

    #[rstest]
    #[case::not_json(b"<html>".as_slice())]
    #[case::array(b"[1]".as_slice())]
    #[case::bare_number(b"7".as_slice())]
    #[case::missing(br#"{"total": 7}"#.as_slice())]
    #[case::string(br#"{"count": "7"}"#.as_slice())]
    #[case::negative(br#"{"count": -1}"#.as_slice())]
    #[case::null(br#"{"count": null}"#.as_slice())]
    fn rejects_malformed_bodies(#[case] body: &[u8]) {
        assert!(decode_count(body).is_err());
    }
}
