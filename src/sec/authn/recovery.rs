use rand::RngCore;

/// bytes of entropy per code; encodes to 16 base32 characters
pub const CODE_LEN: usize = 10;
pub const DEFAULT_CODE_COUNT: usize = 10;

/// Generate one recovery code. Codes use the base32 alphabet and are stored
/// uppercase, which is what `consume` compares against.
pub fn create_code() -> Result<String, rand::Error> {
    let mut bytes = [0u8; CODE_LEN];
    rand::thread_rng().try_fill_bytes(&mut bytes)?;

    Ok(data_encoding::BASE32_NOPAD.encode(&bytes))
}

pub fn create_codes(count: usize) -> Result<Vec<String>, rand::Error> {
    let mut codes = Vec::with_capacity(count);

    for _ in 0..count {
        codes.push(create_code()?);
    }

    Ok(codes)
}

/// Single-use consumption: uppercase the submission, remove the first
/// matching entry and return what is left. `None` means no match and the
/// stored list is untouched. The list never grows here; once it is empty
/// the account needs recovery tooling.
pub fn consume(codes: &[String], submitted: &str) -> Option<Vec<String>> {
    let normalized = submitted.to_uppercase();
    let index = codes.iter().position(|code| *code == normalized)?;

    let mut remaining = codes.to_vec();
    remaining.remove(index);

    Some(remaining)
}

#[cfg(test)]
mod test {
    use super::*;

    fn stored() -> Vec<String> {
        vec![
            String::from("AAAA-1111"),
            String::from("BBBB-2222"),
            String::from("CCCC-3333"),
        ]
    }

    #[test]
    fn consumes_first_match_only() {
        let remaining = consume(&stored(), "BBBB-2222").unwrap();

        assert_eq!(remaining, vec!["AAAA-1111", "CCCC-3333"]);
    }

    #[test]
    fn normalizes_case() {
        let remaining = consume(&stored(), "cccc-3333").unwrap();

        assert_eq!(remaining.len(), 2);
        assert!(!remaining.contains(&String::from("CCCC-3333")));
    }

    #[test]
    fn no_match_leaves_list_alone() {
        let codes = stored();

        assert!(consume(&codes, "DDDD-4444").is_none());
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn second_use_fails() {
        let remaining = consume(&stored(), "AAAA-1111").unwrap();

        assert!(consume(&remaining, "AAAA-1111").is_none());
    }

    #[test]
    fn empty_list_never_matches() {
        assert!(consume(&[], "AAAA-1111").is_none());
    }

    #[test]
    fn generated_codes_are_uppercase_and_distinct() {
        let codes = create_codes(DEFAULT_CODE_COUNT).unwrap();

        assert_eq!(codes.len(), DEFAULT_CODE_COUNT);

        for code in &codes {
            assert_eq!(*code, code.to_uppercase());
            assert_eq!(code.len(), 16);
        }

        assert_ne!(codes[0], codes[1]);
    }
}
