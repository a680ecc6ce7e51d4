//! `serde` support for the containers, behind the `serde_support` feature.
//!
//! A [`Heap`] serializes as a sequence in raw heap order and a [`RbArena`]
//! as a map from the least key to the greatest. Deserialization rebuilds the
//! structure through `push`/`put` with the `Default` comparator, so a round
//! trip preserves contents but not slot assignment or tombstones.

use core::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{Compare, Heap, RbArena};

impl<T: Serialize, C> Serialize for Heap<T, C>
where
    C: Compare<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

struct HeapVisitor<T, C> {
    _boo: PhantomData<fn() -> (T, C)>,
}

impl<'de, T: Deserialize<'de>, C: Compare<T> + Default> Visitor<'de> for HeapVisitor<T, C> {
    type Value = Heap<T, C>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of heap elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut res = Heap::with_comparator_and_capacity(
            C::default(),
            seq.size_hint().unwrap_or(0),
        );
        while let Some(t) = seq.next_element()? {
            res.push(t);
        }
        Ok(res)
    }
}

impl<'de, T: Deserialize<'de>, C: Compare<T> + Default> Deserialize<'de> for Heap<T, C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(HeapVisitor {
            _boo: PhantomData,
        })
    }
}

impl<K: Serialize, V: Serialize, C: Compare<K>> Serialize for RbArena<K, V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter_ordered())
    }
}

struct RbArenaVisitor<K, V, C> {
    _boo: PhantomData<fn() -> (K, V, C)>,
}

impl<'de, K, V, C> Visitor<'de> for RbArenaVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    type Value = RbArena<K, V, C>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of key-value entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut res = RbArena::with_comparator_and_capacity(
            C::default(),
            map.size_hint().unwrap_or(0),
        );
        while let Some((k, v)) = map.next_entry()? {
            let _ = res.put(k, v);
        }
        Ok(res)
    }
}

impl<'de, K, V, C> Deserialize<'de> for RbArena<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RbArenaVisitor {
            _boo: PhantomData,
        })
    }
}
