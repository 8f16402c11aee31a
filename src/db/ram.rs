use super::*;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct RamKvStore(HashMap<String, Blob>);

impl RamKvStore {
    pub fn new() -> RamKvStore {
        Default::default()
    }
}

impl KvStore for RamKvStore {
    fn get(&self, k: StringKey) -> Result<Option<Blob>, KvStoreError> {
        Ok(self.0.get(&k.0).cloned())
    }
    fn update(&mut self, ops: &[WriteOp]) -> Result<(), KvStoreError> {
        for op in ops.iter() {
            match op {
                WriteOp::Remove(k) => self.0.remove(&k.0),
                WriteOp::Put(k, v) => self.0.insert(k.0.clone(), v.clone()),
            };
        }
        Ok(())
    }
    fn pairs(&self, prefix: StringKey) -> Result<Vec<(StringKey, Blob)>, KvStoreError> {
        let mut pairs = self
            .0
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix.0))
            .map(|(k, v)| (StringKey(k.clone()), v.clone()))
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(pairs)
    }
}
