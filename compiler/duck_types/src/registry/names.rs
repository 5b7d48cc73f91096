//! Type name rendering.
//!
//! Three spellings are needed: the metadata name used in diagnostics
//! (`ValueTypeEnumerator`1`), the source-level name used in rendered code
//! (`Enumerable<int>`), and the namespace-qualified name used in casts
//! (`System.IDisposable`).

use duck_ir::TypeId;

use super::TypeRegistry;
use crate::flags::TypeFlags;

impl TypeRegistry {
    /// Number of generic parameters or arguments of `ty`.
    fn arity(&self, ty: TypeId) -> usize {
        let entry = self.entry(ty);
        if entry.flags.contains(TypeFlags::GENERIC_DEFINITION) {
            entry.generic_params.len()
        } else {
            entry.type_args.len()
        }
    }

    /// Simple name with the generic arity suffix: `Enumerator`1`.
    pub fn metadata_name(&self, ty: TypeId) -> String {
        let name = self.lookup(self.entry(ty).name);
        match self.arity(ty) {
            0 => name.to_string(),
            arity => format!("{name}`{arity}"),
        }
    }

    /// Source-level name: keywords for primitives, `Outer.Inner`, `Name<args>`.
    pub fn display_name(&self, ty: TypeId) -> String {
        match ty {
            TypeId::VOID => return "void".to_string(),
            TypeId::BOOL => return "bool".to_string(),
            TypeId::INT => return "int".to_string(),
            TypeId::STRING => return "string".to_string(),
            TypeId::OBJECT => return "object".to_string(),
            _ => {}
        }

        let entry = self.entry(ty);
        let mut out = String::new();
        if let Some(outer) = entry.declaring_type {
            out.push_str(&self.display_name(outer));
            out.push('.');
        }
        out.push_str(self.lookup(entry.name));

        let args: &[TypeId] = if entry.flags.contains(TypeFlags::GENERIC_DEFINITION) {
            &entry.generic_params
        } else {
            &entry.type_args
        };
        if !args.is_empty() {
            out.push('<');
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.display_name(arg));
            }
            out.push('>');
        }
        out
    }

    /// Namespace-qualified metadata name: `System.IDisposable`,
    /// `RangeEnumerable+Enumerator`, `Enumerable`1[System.Int32]`.
    pub fn full_name(&self, ty: TypeId) -> String {
        let entry = self.entry(ty);
        let mut out = match entry.declaring_type {
            Some(outer) => format!("{}+", self.full_name(outer)),
            None => {
                let namespace = self.lookup(entry.namespace);
                if namespace.is_empty() {
                    String::new()
                } else {
                    format!("{namespace}.")
                }
            }
        };
        out.push_str(&self.metadata_name(ty));

        if !entry.type_args.is_empty() {
            out.push('[');
            for (i, &arg) in entry.type_args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&self.full_name(arg));
            }
            out.push(']');
        }
        out
    }
}
