use duck_ir::{MemberId, TypeId};
use pretty_assertions::assert_eq;

use super::NativeMethods;
use crate::{Heap, Value};

#[test]
fn defined_bodies_run_against_the_heap() {
    let mut natives = NativeMethods::new();
    let bump = MemberId::new(7);
    natives.define(bump, |heap, receiver, args| {
        let obj = receiver.as_object()?;
        let next = heap.field(obj, 0)?.as_int()? + args[0].as_int()?;
        heap.set_field(obj, 0, Value::Int(next))?;
        Ok(Value::Int(next))
    });

    let mut heap = Heap::new();
    let obj = heap.alloc_object(TypeId::OBJECT, &[Value::Int(40)]);
    let body = natives.get(bump).unwrap_or_else(|| panic!("body registered"));

    assert_eq!(body(&mut heap, Value::Object(obj), &[Value::Int(2)]), Ok(Value::Int(42)));
    assert_eq!(heap.field(obj, 0), Ok(Value::Int(42)));
    assert!(natives.contains(bump));
    assert!(!natives.contains(MemberId::new(8)));
    assert_eq!(natives.len(), 1);
}
