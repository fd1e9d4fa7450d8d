//! Lookup tables over the gate catalogue.
//!
//! [`GateRegistry::builtin`] is built once on first use and never mutated.
//! Every lookup is a single hash probe.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

use crate::error::{IrError, IrResult};
use crate::gate::{CONTROL_SYMBOL, GateKind};

static BUILTIN: LazyLock<GateRegistry> = LazyLock::new(|| match GateRegistry::new(GateKind::ALL) {
    Ok(registry) => registry,
    Err(e) => panic!("built-in gate table is inconsistent: {e}"),
});

/// An ordered, validated set of gate kinds with lookup by every name.
#[derive(Debug, Clone)]
pub struct GateRegistry {
    kinds: Vec<GateKind>,
    by_wire_symbol: FxHashMap<&'static str, GateKind>,
    by_canonical_id: FxHashMap<&'static str, GateKind>,
    by_host_name: FxHashMap<&'static str, GateKind>,
}

impl GateRegistry {
    /// Build a registry over `kinds`, preserving their order.
    ///
    /// Fails with [`IrError::InconsistentRegistry`] if any name is
    /// duplicated, if two wire symbols collide after ASCII case-folding
    /// without being an inverse pair, or if a symbol does not have the
    /// `C…C<target>` shape its arity demands.
    pub fn new(kinds: impl IntoIterator<Item = GateKind>) -> IrResult<Self> {
        let kinds: Vec<GateKind> = kinds.into_iter().collect();
        let mut by_wire_symbol = FxHashMap::default();
        let mut by_canonical_id = FxHashMap::default();
        let mut by_host_name = FxHashMap::default();

        for &kind in &kinds {
            check_symbol_shape(kind, kind.wire_symbol())?;
            if kind.canonical_id() != kind.canonical_id().to_ascii_uppercase() {
                return Err(IrError::InconsistentRegistry(format!(
                    "canonical id '{}' is not upper-case",
                    kind.canonical_id()
                )));
            }
            insert_unique(&mut by_wire_symbol, kind.wire_symbol(), kind, "wire symbol")?;
            insert_unique(&mut by_canonical_id, kind.canonical_id(), kind, "canonical id")?;
            insert_unique(&mut by_host_name, kind.host_name(), kind, "host name")?;
        }

        let entries: Vec<_> = kinds.iter().map(|&k| (k, k.wire_symbol())).collect();
        check_case_folding(&entries)?;

        Ok(Self {
            kinds,
            by_wire_symbol,
            by_canonical_id,
            by_host_name,
        })
    }

    /// The registry of every supported kind.
    pub fn builtin() -> &'static GateRegistry {
        &BUILTIN
    }

    /// Look up a kind by its exact wire symbol (`"CN"`, `"s"`).
    pub fn lookup_by_wire_symbol(&self, symbol: &str) -> IrResult<GateKind> {
        self.by_wire_symbol
            .get(symbol)
            .copied()
            .ok_or_else(|| IrError::UnknownGate(symbol.to_string()))
    }

    /// Look up a kind by canonical id, ignoring ASCII case.
    pub fn lookup_by_canonical_id(&self, id: &str) -> IrResult<GateKind> {
        self.by_canonical_id
            .get(id.to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| IrError::UnknownGate(id.to_string()))
    }

    /// Look up a kind by its front-end name (`"cx"`, `"measure"`).
    pub fn lookup_by_host_name(&self, name: &str) -> IrResult<GateKind> {
        self.by_host_name
            .get(name)
            .copied()
            .ok_or_else(|| IrError::UnknownGate(name.to_string()))
    }

    /// All kinds, in registry order.
    pub fn all(&self) -> &[GateKind] {
        &self.kinds
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the registry holds no kinds.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether `kind` is registered.
    pub fn contains(&self, kind: GateKind) -> bool {
        self.by_wire_symbol.get(kind.wire_symbol()) == Some(&kind)
    }
}

impl GateKind {
    /// Shorthand for a wire-symbol lookup in the built-in registry.
    pub fn from_wire_symbol(symbol: &str) -> IrResult<GateKind> {
        GateRegistry::builtin().lookup_by_wire_symbol(symbol)
    }

    /// Shorthand for a canonical-id lookup in the built-in registry.
    pub fn from_canonical_id(id: &str) -> IrResult<GateKind> {
        GateRegistry::builtin().lookup_by_canonical_id(id)
    }

    /// Shorthand for a host-name lookup in the built-in registry.
    pub fn from_host_name(name: &str) -> IrResult<GateKind> {
        GateRegistry::builtin().lookup_by_host_name(name)
    }
}

fn insert_unique(
    map: &mut FxHashMap<&'static str, GateKind>,
    key: &'static str,
    kind: GateKind,
    what: &str,
) -> IrResult<()> {
    if let Some(existing) = map.insert(key, kind) {
        return Err(IrError::InconsistentRegistry(format!(
            "{what} '{key}' is shared by {existing:?} and {kind:?}"
        )));
    }
    Ok(())
}

fn check_symbol_shape(kind: GateKind, symbol: &str) -> IrResult<()> {
    let controls = symbol.chars().take_while(|&c| c == CONTROL_SYMBOL).count();
    let rest: Vec<char> = symbol.chars().skip(controls).collect();
    let arity = kind.num_qubits() as usize;

    if rest.len() != 1 || !symbol.is_ascii() {
        return Err(IrError::InconsistentRegistry(format!(
            "wire symbol '{symbol}' of {kind:?} must be control markers followed by one target character"
        )));
    }
    if controls + 1 != arity {
        return Err(IrError::InconsistentRegistry(format!(
            "wire symbol '{symbol}' implies {} qubits but {kind:?} acts on {arity}",
            controls + 1
        )));
    }
    Ok(())
}

fn check_case_folding(entries: &[(GateKind, &str)]) -> IrResult<()> {
    let mut folded: FxHashMap<String, (GateKind, &str)> = FxHashMap::default();
    for &(kind, symbol) in entries {
        if let Some((other, other_symbol)) = folded.insert(symbol.to_ascii_lowercase(), (kind, symbol))
        {
            if other_symbol != symbol && kind.inverse() != Some(other) {
                return Err(IrError::InconsistentRegistry(format!(
                    "wire symbols '{other_symbol}' and '{symbol}' differ only in case but are not inverses"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_holds_every_kind_in_order() {
        let registry = GateRegistry::builtin();
        assert_eq!(registry.all(), &GateKind::ALL);
        assert_eq!(registry.len(), 20);
    }

    #[test]
    fn test_wire_symbols_are_unique() {
        let mut symbols: Vec<_> = GateKind::ALL.iter().map(|k| k.wire_symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), GateKind::ALL.len());
    }

    #[test]
    fn test_lookups() {
        let registry = GateRegistry::builtin();
        for kind in GateKind::ALL {
            assert_eq!(registry.lookup_by_wire_symbol(kind.wire_symbol()), Ok(kind));
            assert_eq!(registry.lookup_by_canonical_id(kind.canonical_id()), Ok(kind));
            assert_eq!(registry.lookup_by_host_name(kind.host_name()), Ok(kind));
        }
    }

    #[test]
    fn test_canonical_id_is_case_insensitive() {
        assert_eq!(GateKind::from_canonical_id("cx_gate"), Ok(GateKind::CX));
        assert_eq!(GateKind::from_canonical_id("Measurement_Gate"), Ok(GateKind::Measure));
    }

    #[test]
    fn test_wire_symbol_is_case_sensitive() {
        assert_eq!(GateKind::from_wire_symbol("S"), Ok(GateKind::S));
        assert_eq!(GateKind::from_wire_symbol("s"), Ok(GateKind::Sdg));
        assert_eq!(
            GateKind::from_wire_symbol("cn"),
            Err(IrError::UnknownGate("cn".into()))
        );
    }

    #[test]
    fn test_unknown_keys() {
        assert!(matches!(
            GateKind::from_wire_symbol("Q"),
            Err(IrError::UnknownGate(s)) if s == "Q"
        ));
        assert!(GateKind::from_host_name("rx").is_err());
        assert!(GateKind::from_canonical_id("RX_GATE").is_err());
    }

    #[test]
    fn test_duplicate_kind_is_rejected() {
        let err = GateRegistry::new([GateKind::X, GateKind::H, GateKind::X]).unwrap_err();
        assert!(matches!(err, IrError::InconsistentRegistry(_)));
    }

    #[test]
    fn test_subset_registry() {
        let registry = GateRegistry::new([GateKind::X, GateKind::CX, GateKind::Measure]).unwrap();
        assert!(registry.contains(GateKind::CX));
        assert!(!registry.contains(GateKind::H));
        assert!(registry.lookup_by_wire_symbol("H").is_err());
    }

    #[test]
    fn test_case_fold_collision_requires_inverse_pair() {
        assert!(check_case_folding(&[(GateKind::S, "S"), (GateKind::Sdg, "s")]).is_ok());
        assert!(check_case_folding(&[(GateKind::X, "X"), (GateKind::Y, "x")]).is_err());
    }

    #[test]
    fn test_symbol_shape() {
        assert!(check_symbol_shape(GateKind::CCX, "CCN").is_ok());
        assert!(check_symbol_shape(GateKind::CCX, "CN").is_err());
        assert!(check_symbol_shape(GateKind::CX, "NC").is_err());
        assert!(check_symbol_shape(GateKind::X, "XX").is_err());
    }
}
