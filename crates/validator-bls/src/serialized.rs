use crate::{Error, Result, EPOCHENTROPYBYTES, PUBLICKEYBYTES, SIGNATUREBYTES};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::TryFrom, fmt, str::FromStr};

/// Declares a fixed length byte array with hex text and JSON codecs. Text is `0x` followed by
/// lowercase hex; parsing requires the prefix and the exact length.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length of the encoding in bytes
            pub const LEN: usize = $len;

            /// Copies `bytes`, which must be exactly `LEN` bytes long
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $len {
                    return Err(Error::WrongLength {
                        ty: stringify!($name),
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                let mut out = [0u8; $len];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = Error;

            fn try_from(bytes: &[u8]) -> Result<Self> {
                Self::from_bytes(bytes)
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    write!(f, "0x")?;
                }
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{:#x}", self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({:#x})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let hex_str = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .ok_or(Error::MissingHexPrefix)?;
                Self::from_bytes(&hex::decode(hex_str)?)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                self.to_string().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let text = <String>::deserialize(deserializer)?;
                text.parse().map_err(D::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A compressed BLS12-377 G2 point
    SerializedPublicKey,
    PUBLICKEYBYTES
);

fixed_bytes!(
    /// A compressed BLS12-377 G1 point
    SerializedSignature,
    SIGNATUREBYTES
);

fixed_bytes!(
    /// Block entropy committed to by CIP22 epoch data
    EpochEntropy,
    EPOCHENTROPYBYTES
);

impl EpochEntropy {
    /// Truncates a block hash to the entropy length
    pub fn from_hash(hash: &[u8; 32]) -> Self {
        let mut entropy = [0u8; EPOCHENTROPYBYTES];
        entropy.copy_from_slice(&hash[..EPOCHENTROPYBYTES]);
        Self(entropy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_signature() -> SerializedSignature {
        let mut bytes = [0u8; SIGNATUREBYTES];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        SerializedSignature::from(bytes)
    }

    #[test]
    fn test_from_and_to_string() {
        let sig = sample_signature();
        let text = sig.to_string();
        assert!(text.starts_with("0x0001020304"));
        assert_eq!(text.len(), 2 + 2 * SIGNATUREBYTES);
        assert_eq!(text.parse::<SerializedSignature>().unwrap(), sig);
        assert_eq!(text.to_uppercase().parse::<SerializedSignature>().unwrap(), sig);
        assert_eq!(format!("{:x}", sig), text[2..]);
    }

    #[test]
    fn test_from_and_to_json() {
        let sig = sample_signature();
        let val: Value = serde_json::to_value(sig).unwrap();
        assert_eq!(val, json!(sig.to_string()));
        let de: SerializedSignature = serde_json::from_value(val).unwrap();
        assert_eq!(de, sig);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = "0x0102".parse::<SerializedPublicKey>().unwrap_err();
        assert!(matches!(
            err,
            Error::WrongLength {
                ty: "SerializedPublicKey",
                expected: PUBLICKEYBYTES,
                actual: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "wrong length for SerializedPublicKey: expected 96, got 2"
        );

        let err = SerializedSignature::try_from(&[0u8; 47][..]).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongLength {
                expected: SIGNATUREBYTES,
                actual: 47,
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_text() {
        let hex_body = "00".repeat(EPOCHENTROPYBYTES);
        assert!(matches!(
            hex_body.parse::<EpochEntropy>(),
            Err(Error::MissingHexPrefix)
        ));
        let bad = format!("0x{}zz", "00".repeat(EPOCHENTROPYBYTES - 1));
        assert!(matches!(bad.parse::<EpochEntropy>(), Err(Error::InvalidHex(_))));
        let odd = format!("0x{}0", "00".repeat(EPOCHENTROPYBYTES));
        assert!(matches!(odd.parse::<EpochEntropy>(), Err(Error::InvalidHex(_))));

        let json = json!("0x00");
        assert!(serde_json::from_value::<EpochEntropy>(json).is_err());
        assert!(serde_json::from_value::<EpochEntropy>(json!(5)).is_err());
    }

    #[test]
    fn entropy_from_hash() {
        let mut hash = [0u8; 32];
        hash[15] = 0xaa;
        hash[16] = 0xbb;
        let entropy = EpochEntropy::from_hash(&hash);
        assert_eq!(entropy.as_bytes()[15], 0xaa);
        assert_eq!(&entropy.as_bytes()[..], &hash[..EPOCHENTROPYBYTES]);
    }

    #[test]
    fn debug_names_the_type() {
        let entropy = EpochEntropy::from([0x11; EPOCHENTROPYBYTES]);
        assert_eq!(
            format!("{:?}", entropy),
            format!("EpochEntropy(0x{})", "11".repeat(EPOCHENTROPYBYTES))
        );
    }
}
