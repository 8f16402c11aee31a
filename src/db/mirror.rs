use super::*;
use std::collections::BTreeMap;

// Copy-on-write overlay on top of another store. Writes land in the overlay
// only; `to_ops` turns them into the batch that would bring the base store
// up to date. Dropping the mirror without applying that batch is a rollback.
pub struct RamMirrorKvStore<'a, K: KvStore> {
    base: &'a K,
    overlay: BTreeMap<String, Option<Blob>>,
}

impl<'a, K: KvStore> RamMirrorKvStore<'a, K> {
    pub fn new(base: &'a K) -> Self {
        Self {
            base,
            overlay: BTreeMap::new(),
        }
    }

    pub fn to_ops(self) -> Vec<WriteOp> {
        self.overlay
            .into_iter()
            .map(|(k, v)| match v {
                Some(b) => WriteOp::Put(StringKey(k), b),
                None => WriteOp::Remove(StringKey(k)),
            })
            .collect()
    }
}

impl<'a, K: KvStore> KvStore for RamMirrorKvStore<'a, K> {
    fn get(&self, k: StringKey) -> Result<Option<Blob>, KvStoreError> {
        match self.overlay.get(&k.0) {
            Some(v) => Ok(v.clone()),
            None => self.base.get(k),
        }
    }
    fn update(&mut self, ops: &[WriteOp]) -> Result<(), KvStoreError> {
        for op in ops.iter() {
            match op {
                WriteOp::Remove(k) => self.overlay.insert(k.0.clone(), None),
                WriteOp::Put(k, v) => self.overlay.insert(k.0.clone(), Some(v.clone())),
            };
        }
        Ok(())
    }
    fn pairs(&self, prefix: StringKey) -> Result<Vec<(StringKey, Blob)>, KvStoreError> {
        let mut merged: BTreeMap<String, Blob> = self
            .base
            .pairs(prefix.clone())?
            .into_iter()
            .map(|(k, v)| (k.0, v))
            .collect();
        for (k, v) in self.overlay.iter() {
            if !k.starts_with(&prefix.0) {
                continue;
            }
            match v {
                Some(b) => merged.insert(k.clone(), b.clone()),
                None => merged.remove(k),
            };
        }
        Ok(merged
            .into_iter()
            .map(|(k, v)| (StringKey(k), v))
            .collect())
    }
}
