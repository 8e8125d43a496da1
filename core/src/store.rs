//! In-memory parameter store.
//!
//! Holds parameter definitions and their values as two ordered collections
//! kept in lockstep: every add appends to both, every delete removes from
//! both. All operations are total. A duplicate name on add or an unknown id
//! on set/delete leaves the store untouched and is only visible in the
//! debug log.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::config::SeedParam;
use crate::types::param::{Model, Param, ParamEntry, ParamId, ParamType, ParamValue};


/// Monotonic id source. Never hands out an id that is in use, and never
/// one that was in use until the `u64` range runs out; past `u64::MAX` it
/// wraps to 1 and skips taken ids.
#[derive(Debug, Clone)]
struct IdCounter {
    next: u64,
}

impl IdCounter {
    fn after(params: &[Param]) -> Self {
        let max = params.iter().map(|p| p.id.0).max().unwrap_or(0);
        IdCounter { next: successor(max) }
    }

    /// Terminates: fewer than `u64::MAX` ids can be taken at once.
    fn allocate(&mut self, params: &[Param]) -> ParamId {
        loop {
            let id = ParamId(self.next);
            self.next = successor(self.next);
            if !params.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }
}

fn successor(id: u64) -> u64 {
    id.checked_add(1).unwrap_or(1)
}


/// Session state: the parameter list and the value bound to each parameter.
#[derive(Debug, Clone)]
pub struct ParamStore {
    params: Vec<Param>,
    values: Vec<ParamValue>,
    ids: IdCounter,
}

impl ParamStore {
    /// Create an empty store.
    pub fn new() -> Self {
        ParamStore {
            params: Vec::new(),
            values: Vec::new(),
            ids: IdCounter { next: 1 },
        }
    }

    /// Create a store from `(name, value)` seeds. Ids are assigned 1..n in
    /// seed order; a seed repeating an earlier name is skipped.
    pub fn seeded(seed: &[SeedParam]) -> Self {
        let mut store = ParamStore::new();
        for entry in seed {
            store.add_param(&entry.name, ParamType::String, &entry.value);
        }
        store
    }

    /// The session a fresh editor opens with.
    pub fn with_defaults() -> Self {
        ParamStore::seeded(&crate::types::config::Settings::default().seed)
    }

    /// Rebuild a store from explicit collections.
    ///
    /// Restores the lockstep invariant: parameters with a repeated id or
    /// name are dropped after the first, values without a parameter are
    /// dropped, and parameters without a value get an empty one. Values
    /// are reordered to follow the parameter list.
    pub fn from_parts(params: Vec<Param>, values: Vec<ParamValue>) -> Self {
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        let mut kept = Vec::with_capacity(params.len());
        for param in params {
            if seen_ids.contains(&param.id) || seen_names.contains(&param.name) {
                debug!(id = %param.id, name = %param.name, "dropping duplicate parameter");
                continue;
            }
            seen_ids.insert(param.id);
            seen_names.insert(param.name.clone());
            kept.push(param);
        }

        let mut by_id: HashMap<ParamId, String> = HashMap::new();
        for value in values {
            by_id.entry(value.param_id).or_insert(value.value);
        }
        let values: Vec<ParamValue> = kept
            .iter()
            .map(|p| ParamValue::new(p.id, by_id.remove(&p.id).unwrap_or_default()))
            .collect();
        if !by_id.is_empty() {
            debug!(orphans = by_id.len(), "dropping values with no parameter");
        }

        let ids = IdCounter::after(&kept);
        ParamStore {
            params: kept,
            values,
            ids,
        }
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Replace the value bound to `id`. Unknown ids are ignored.
    pub fn set_value(&mut self, id: ParamId, value: impl Into<String>) {
        match self.values.iter_mut().find(|v| v.param_id == id) {
            Some(slot) => {
                slot.value = value.into();
                debug!(%id, value = %slot.value, "value set");
            }
            None => debug!(%id, "set ignored: no such parameter"),
        }
    }

    /// Append a parameter named `name` with `value`, unless the name is
    /// already taken, in which case nothing changes.
    pub fn add_param(&mut self, name: &str, param_type: ParamType, value: &str) {
        if self.params.iter().any(|p| p.name == name) {
            debug!(name, "add ignored: name already exists");
            return;
        }
        let id = self.ids.allocate(&self.params);
        self.params.push(Param {
            id,
            name: name.to_string(),
            param_type,
        });
        self.values.push(ParamValue::new(id, value));
        debug!(%id, name, "parameter added");
    }

    /// Add a string parameter with an empty value.
    pub fn add(&mut self, name: &str) {
        self.add_param(name, ParamType::String, "");
    }

    /// Remove the parameter `id` and its value. Unknown ids are ignored.
    pub fn delete_param(&mut self, id: ParamId) {
        let before = self.params.len();
        self.params.retain(|p| p.id != id);
        if self.params.len() == before {
            debug!(%id, "delete ignored: no such parameter");
            return;
        }
        self.values.retain(|v| v.param_id != id);
        debug!(%id, "parameter deleted");
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Parameters joined with their values, in insertion order.
    pub fn view(&self) -> Vec<ParamEntry> {
        let values: HashMap<ParamId, &str> = self
            .values
            .iter()
            .map(|v| (v.param_id, v.value.as_str()))
            .collect();
        self.params
            .iter()
            .map(|p| ParamEntry {
                id: p.id,
                name: p.name.clone(),
                param_type: p.param_type,
                value: values.get(&p.id).copied().unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Snapshot of the current values.
    pub fn model(&self) -> Model {
        Model {
            param_values: self.values.clone(),
        }
    }

    pub fn get(&self, id: ParamId) -> Option<&Param> {
        self.params.iter().find(|p| p.id == id)
    }

    pub fn value(&self, id: ParamId) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.param_id == id)
            .map(|v| v.value.as_str())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dress() -> ParamStore {
        ParamStore::from_parts(
            vec![Param::new(1, "Назначение"), Param::new(2, "Длина")],
            vec![ParamValue::new(1, "повседневное"), ParamValue::new(2, "макси")],
        )
    }

    fn triples(store: &ParamStore) -> Vec<(u64, String, String)> {
        store
            .view()
            .into_iter()
            .map(|e| (e.id.0, e.name, e.value))
            .collect()
    }

    fn assert_lockstep(store: &ParamStore) {
        assert_eq!(store.params().len(), store.values().len());
        for (p, v) in store.params().iter().zip(store.values()) {
            assert_eq!(p.id, v.param_id);
        }
    }

    #[test]
    fn new_is_empty() {
        let store = ParamStore::new();
        assert!(store.is_empty());
        assert!(store.view().is_empty());
        assert!(store.model().param_values.is_empty());
    }

    #[test]
    fn defaults_match_initial_session() {
        let store = ParamStore::with_defaults();
        assert_eq!(
            triples(&store),
            vec![
                (1, "Назначение".to_string(), "повседневное".to_string()),
                (2, "Длина".to_string(), "макси".to_string()),
            ]
        );
    }

    #[test]
    fn distinct_adds_keep_first_added_order() {
        let mut store = ParamStore::new();
        for name in ["c", "a", "b"] {
            store.add(name);
        }
        let names: Vec<String> = store.view().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_lockstep(&store);
    }

    #[test]
    fn add_defaults_to_empty_string_value() {
        let mut store = ParamStore::new();
        store.add("Цвет");
        let view = store.view();
        assert_eq!(view[0].value, "");
        assert_eq!(view[0].param_type, ParamType::String);
    }

    #[test]
    fn duplicate_name_is_ignored() {
        let mut store = dress();
        let params_before = store.params().to_vec();
        let values_before = store.values().to_vec();
        store.add_param("Длина", ParamType::String, "мини");
        assert_eq!(store.params(), params_before.as_slice());
        assert_eq!(store.values(), values_before.as_slice());
    }

    #[test]
    fn names_compare_exactly() {
        let mut store = dress();
        store.add("длина");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn set_value_changes_only_target() {
        let mut store = dress();
        store.set_value(ParamId(1), "вечернее");
        assert_eq!(store.value(ParamId(1)), Some("вечернее"));
        assert_eq!(store.value(ParamId(2)), Some("макси"));
        assert_eq!(store.view()[0].value, "вечернее");
    }

    #[test]
    fn set_value_accepts_empty() {
        let mut store = dress();
        store.set_value(ParamId(2), "");
        assert_eq!(store.value(ParamId(2)), Some(""));
    }

    #[test]
    fn set_unknown_id_is_noop() {
        let mut store = dress();
        let before = store.view();
        store.set_value(ParamId(99), "x");
        assert_eq!(store.view(), before);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_removes_both_halves() {
        let mut store = dress();
        store.delete_param(ParamId(1));
        assert_eq!(store.len(), 1);
        assert!(store.get(ParamId(1)).is_none());
        assert!(store.value(ParamId(1)).is_none());
        assert_lockstep(&store);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = dress();
        store.delete_param(ParamId(42));
        assert_eq!(store.len(), 2);
        assert_lockstep(&store);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = ParamStore::new();
        store.add("a");
        store.add("b");
        let b = store.find_by_name("b").unwrap().id;
        store.delete_param(b);
        store.add("c");
        let c = store.find_by_name("c").unwrap().id;
        assert_ne!(b, c);
        assert!(c > b);
    }

    #[test]
    fn deleted_name_can_be_added_again() {
        let mut store = dress();
        store.delete_param(ParamId(2));
        store.add_param("Длина", ParamType::String, "миди");
        assert_eq!(store.len(), 2);
        let entry = store.view().pop().unwrap();
        assert_eq!(entry.name, "Длина");
        assert_eq!(entry.value, "миди");
        assert_eq!(entry.id, ParamId(3));
    }

    #[test]
    fn seeded_skips_duplicate_names() {
        let store = ParamStore::seeded(&[
            SeedParam::new("a", "1"),
            SeedParam::new("a", "2"),
            SeedParam::new("b", ""),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.value(ParamId(1)), Some("1"));
        assert_eq!(store.find_by_name("b").unwrap().id, ParamId(2));
    }

    #[test]
    fn from_parts_repairs_lockstep() {
        let store = ParamStore::from_parts(
            vec![
                Param::new(5, "a"),
                Param::new(5, "dup-id"),
                Param::new(6, "a"),
                Param::new(9, "b"),
            ],
            vec![
                ParamValue::new(9, "nine"),
                ParamValue::new(77, "orphan"),
                ParamValue::new(5, "five"),
                ParamValue::new(5, "second"),
            ],
        );
        assert_eq!(
            triples(&store),
            vec![
                (5, "a".to_string(), "five".to_string()),
                (9, "b".to_string(), "nine".to_string()),
            ]
        );
        assert_lockstep(&store);
    }

    #[test]
    fn from_parts_fills_missing_values() {
        let store = ParamStore::from_parts(vec![Param::new(3, "x")], Vec::new());
        assert_eq!(store.value(ParamId(3)), Some(""));
    }

    #[test]
    fn ids_continue_after_largest_existing() {
        let mut store = ParamStore::from_parts(
            vec![Param::new(1_700_000_000_000, "a")],
            vec![ParamValue::new(1_700_000_000_000, "")],
        );
        store.add("b");
        assert_eq!(store.find_by_name("b").unwrap().id, ParamId(1_700_000_000_001));
    }

    #[test]
    fn ids_wrap_after_largest_possible() {
        let mut store = ParamStore::from_parts(
            vec![Param::new(u64::MAX, "a"), Param::new(1, "b")],
            vec![ParamValue::new(u64::MAX, "x")],
        );
        store.add("c");
        store.add("d");
        assert_eq!(store.find_by_name("c").unwrap().id, ParamId(2));
        assert_eq!(store.find_by_name("d").unwrap().id, ParamId(3));
        assert_eq!(store.value(ParamId(u64::MAX)), Some("x"));
        assert_lockstep(&store);
    }

    #[test]
    fn max_id_from_json_still_accepts_adds() {
        let params: Vec<Param> =
            serde_json::from_str(r#"[{"id":18446744073709551615,"name":"a"}]"#).unwrap();
        let mut store = ParamStore::from_parts(params, Vec::new());
        store.add_param("b", ParamType::String, "y");
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_name("b").unwrap().id, ParamId(1));
    }

    #[test]
    fn model_follows_parameter_order() {
        let mut store = dress();
        store.add_param("Цвет", ParamType::String, "красный");
        let ids: Vec<u64> = store.model().param_values.iter().map(|v| v.param_id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn dress_scenario() {
        let mut store = dress();

        store.set_value(ParamId(1), "вечернее");
        assert_eq!(
            triples(&store),
            vec![
                (1, "Назначение".to_string(), "вечернее".to_string()),
                (2, "Длина".to_string(), "макси".to_string()),
            ]
        );

        store.add_param("Цвет", ParamType::String, "красный");
        assert_eq!(store.len(), 3);
        let third = &store.view()[2];
        assert_eq!(third.name, "Цвет");
        assert_eq!(third.value, "красный");

        store.add("Длина");
        assert_eq!(store.len(), 3);

        store.delete_param(ParamId(2));
        assert_eq!(
            triples(&store),
            vec![
                (1, "Назначение".to_string(), "вечернее".to_string()),
                (3, "Цвет".to_string(), "красный".to_string()),
            ]
        );
        assert_lockstep(&store);
    }
}
