//! Object and array storage.
//!
//! Objects and arrays are allocated into flat vectors and addressed by
//! `u32` handles. Nothing is ever freed: a heap lives for one run.

use duck_ir::TypeId;
use smallvec::SmallVec;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Handle of a heap object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ObjectRef(u32);

impl ObjectRef {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handle of a heap array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ArrayRef(u32);

impl ArrayRef {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// An instance of a registered class or struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    /// Runtime type, used for interface dispatch.
    pub ty: TypeId,
    /// Positional fields; their meaning is up to the native bodies.
    pub fields: SmallVec<[Value; 4]>,
}

#[derive(Clone, Debug, Default)]
pub struct Heap {
    objects: Vec<Object>,
    arrays: Vec<Vec<Value>>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_object(&mut self, ty: TypeId, fields: &[Value]) -> ObjectRef {
        let handle = ObjectRef(to_handle(self.objects.len()));
        self.objects.push(Object {
            ty,
            fields: SmallVec::from_slice(fields),
        });
        handle
    }

    pub fn alloc_array(&mut self, values: impl IntoIterator<Item = Value>) -> ArrayRef {
        let handle = ArrayRef(to_handle(self.arrays.len()));
        self.arrays.push(values.into_iter().collect());
        handle
    }

    pub fn object(&self, obj: ObjectRef) -> EvalResult<&Object> {
        self.objects
            .get(obj.0 as usize)
            .ok_or_else(|| EvalError::InvalidHandle(format!("object#{}", obj.0)))
    }

    pub fn array(&self, arr: ArrayRef) -> EvalResult<&[Value]> {
        self.arrays
            .get(arr.0 as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| EvalError::InvalidHandle(format!("array#{}", arr.0)))
    }

    pub fn field(&self, obj: ObjectRef, index: usize) -> EvalResult<Value> {
        self.object(obj)?
            .fields
            .get(index)
            .copied()
            .ok_or_else(|| EvalError::InvalidHandle(format!("object#{}.{index}", obj.0)))
    }

    pub fn set_field(&mut self, obj: ObjectRef, index: usize, value: Value) -> EvalResult<()> {
        let slot = self
            .objects
            .get_mut(obj.0 as usize)
            .and_then(|object| object.fields.get_mut(index))
            .ok_or_else(|| EvalError::InvalidHandle(format!("object#{}.{index}", obj.0)))?;
        *slot = value;
        Ok(())
    }

    /// Runtime type of an object value; `None` for anything else.
    pub fn runtime_type(&self, value: Value) -> Option<TypeId> {
        match value {
            Value::Object(obj) => self.objects.get(obj.0 as usize).map(|object| object.ty),
            _ => None,
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[inline]
fn to_handle(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("heap exceeded u32::MAX entries"))
}
