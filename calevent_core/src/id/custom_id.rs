use base64::{
    alphabet::Alphabet,
    engine::{general_purpose::NO_PAD, GeneralPurpose},
    Engine as _,
};

use crate::error::IdError;

use super::ElementId;

/// Turns arbitrary strings into element ids and back.
///
/// Implementations must be injective, and for two inputs of equal length the
/// string ordering of the outputs must match the ordering of the inputs. The
/// range-scan bounds in [`super::TimestampIdCodec`] rely on this.
pub trait CustomIdEncoding {
    fn encode(&self, value: &str) -> Result<ElementId, IdError>;

    fn decode(&self, id: &ElementId) -> Result<String, IdError>;
}

// every character sorts after the one before it in ASCII, so the encoded
// digits compare the same way as the bytes they were made from
const BASE64EXT_CHARS: &str = "-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const BASE64EXT_ALPHABET: Alphabet = match Alphabet::new(BASE64EXT_CHARS) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("base64ext alphabet must hold 64 distinct printable characters"),
};

const BASE64EXT: GeneralPurpose = GeneralPurpose::new(&BASE64EXT_ALPHABET, NO_PAD);

/// Base64 over the UTF-8 bytes of the input, using an alphabet whose
/// characters are in ASCII order and leaving out padding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Base64Ext;

impl CustomIdEncoding for Base64Ext {
    fn encode(&self, value: &str) -> Result<ElementId, IdError> {
        Ok(ElementId::from_raw(BASE64EXT.encode(value.as_bytes())))
    }

    fn decode(&self, id: &ElementId) -> Result<String, IdError> {
        let bytes = BASE64EXT.decode(id.as_str())?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod test {
    use base64::Engine as _;

    use super::*;

    #[test]
    fn alphabet_is_sorted() {
        let chars: Vec<char> = BASE64EXT_CHARS.chars().collect();
        assert_eq!(chars.len(), 64);
        assert!(chars.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn encodes_and_decodes_text() {
        let id = Base64Ext.encode("1700000000000").unwrap();
        assert!(id.as_str().chars().all(|c| BASE64EXT_CHARS.contains(c)));
        assert_eq!(Base64Ext.decode(&id).unwrap(), "1700000000000");
    }

    #[test]
    fn keeps_ordering_of_equal_length_input() {
        let inputs =
            ["1000000000000", "1099999999999", "1700000000000", "1700000000001", "9999999999999"];
        let ids: Vec<ElementId> = inputs.iter().map(|s| Base64Ext.encode(s).unwrap()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        let result = Base64Ext.decode(&ElementId::from_raw("abc+".to_string()));
        assert!(matches!(result, Err(IdError::Base64(_))));
    }

    #[test]
    fn rejects_non_utf8_payload() {
        let id = ElementId::from_raw(BASE64EXT.encode([0xffu8]));
        assert!(matches!(Base64Ext.decode(&id), Err(IdError::Utf8(_))));
    }
}
