use crate::core::hash::Hash;
use crate::core::{Address, Amount};
use db_key::Key;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KvStoreError {
    #[error("kvstore failure")]
    Failure,
    #[error("kvstore data corrupted")]
    Corrupted(#[from] bincode::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct StringKey(pub(crate) String);

impl From<&str> for StringKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StringKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StringKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Key for StringKey {
    fn from_u8(key: &[u8]) -> StringKey {
        StringKey(std::str::from_utf8(key).unwrap().to_string())
    }

    fn as_slice<T, F: Fn(&[u8]) -> T>(&self, f: F) -> T {
        f(self.0.as_bytes())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Blob(pub(crate) Vec<u8>);

impl std::fmt::Display for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

macro_rules! gen_try_into {
    ( $( $x:ty ),* ) => {
        $(
            impl TryInto<$x> for Blob {
                type Error = KvStoreError;
                fn try_into(self) -> Result<$x, Self::Error> {
                    Ok(bincode::deserialize(&self.0)?)
                }
            }
        )*
    };
}

gen_try_into!(u32, u64, usize, bool, Amount, Address);

impl<T: serde::Serialize> From<T> for Blob {
    fn from(n: T) -> Self {
        Self(bincode::serialize(&n).unwrap())
    }
}

#[derive(Clone, Debug)]
pub enum WriteOp {
    Remove(StringKey),
    Put(StringKey, Blob),
}

pub trait KvStore {
    fn get(&self, k: StringKey) -> Result<Option<Blob>, KvStoreError>;
    fn update(&mut self, ops: &[WriteOp]) -> Result<(), KvStoreError>;
    fn pairs(&self, prefix: StringKey) -> Result<Vec<(StringKey, Blob)>, KvStoreError>;
    fn checksum<H: Hash>(&self) -> Result<H::Output, KvStoreError>
    where
        Self: Sized,
    {
        let mut buf = Vec::new();
        for (k, v) in self.pairs("".into())? {
            buf.extend_from_slice(k.0.as_bytes());
            buf.extend_from_slice(&v.0);
        }
        Ok(H::hash(&buf))
    }
    fn mirror(&self) -> RamMirrorKvStore<'_, Self>
    where
        Self: Sized,
    {
        RamMirrorKvStore::new(self)
    }
}

mod ram;
pub use ram::*;

mod mirror;
pub use mirror::*;

#[cfg(feature = "db")]
mod disk;
#[cfg(feature = "db")]
pub use disk::*;
