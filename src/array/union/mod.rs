// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{
    buffer::Buffer,
    datatypes::{DataType, Field, PhysicalType, UnionMode},
    error::{Error, Result},
    scalar::Scalar,
};

use super::{check_physical_type, impl_common_array, Array, ArrayAccessor, ArrayData, ArrayIter};

/// A [`UnionArray`] is an array whose slots may be of a different type, one per field.
/// Every slot has an `i8` type id selecting a child:
/// * in a sparse union, every child has (at least) the length of the union and slot `i` is
///   slot `offset + i` of the selected child.
/// * in a dense union, an `i32` offsets buffer gives the slot of the selected child.
///
/// Unions have no validity of their own: a slot is null iff the selected child slot is null.
#[derive(Clone)]
pub struct UnionArray {
    data: ArrayData,
    fields: Vec<Array>,
}

impl UnionArray {
    /// Interprets `data` as a [`UnionArray`].
    /// # Errors
    /// Errors with [`Error::TypeMismatch`] iff `data` is not a union.
    pub fn try_new(data: ArrayData) -> Result<Self> {
        check_physical_type(&data, PhysicalType::Union, "UnionArray")?;
        let fields = data
            .child_data()
            .iter()
            .cloned()
            .map(Array::try_new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { data, fields })
    }

    /// Creates a new [`UnionArray`] of `data_type` from its type ids, offsets (dense unions
    /// only) and children.
    /// # Errors
    /// Errors with [`Error::Layout`] iff the type ids or offsets are inconsistent with the
    /// children, or offsets are given to a sparse union (or not given to a dense one).
    pub fn from_data(
        data_type: DataType,
        types: Buffer,
        offsets: Option<Buffer>,
        fields: Vec<Array>,
    ) -> Result<Self> {
        let mode = match &data_type {
            DataType::Union(_, _, mode) => *mode,
            _ => {
                return Err(Error::TypeMismatch(format!(
                    "a UnionArray cannot be of type {:?}",
                    data_type
                )))
            }
        };
        let buffers = match (mode, offsets) {
            (UnionMode::Dense, Some(offsets)) => vec![types.clone(), offsets],
            (UnionMode::Sparse, None) => vec![types.clone()],
            (UnionMode::Dense, None) => {
                return Err(Error::oos("a dense union requires an offsets buffer"))
            }
            (UnionMode::Sparse, Some(_)) => {
                return Err(Error::oos("a sparse union cannot have an offsets buffer"))
            }
        };
        Self::try_new(ArrayData::try_new(
            data_type,
            types.len(),
            None,
            buffers,
            fields.into_iter().map(|x| x.into_data()).collect(),
        )?)
    }

    fn parts(&self) -> (&[Field], Option<&[i32]>, UnionMode) {
        match self.data.data_type() {
            DataType::Union(fields, ids, mode) => (fields, ids.as_deref(), *mode),
            _ => unreachable!(),
        }
    }

    /// The fields of this union.
    pub fn fields(&self) -> &[Field] {
        self.parts().0
    }

    /// Whether this union is sparse.
    pub fn is_sparse(&self) -> bool {
        self.parts().2.is_sparse()
    }

    impl_common_array!();

    /// The children of this union, not sliced.
    #[inline]
    pub fn values(&self) -> &[Array] {
        &self.fields
    }

    /// The type ids of the slots of this array.
    #[inline]
    pub fn types(&self) -> &[i8] {
        let offset = self.data.offset();
        &self.data.buffer::<i8>(0)[offset..offset + self.len()]
    }

    /// The offsets of the slots of this array into their child, for dense unions.
    #[inline]
    pub fn offsets(&self) -> Option<&[i32]> {
        if self.is_sparse() {
            return None;
        }
        let offset = self.data.offset();
        Some(&self.data.buffer::<i32>(1)[offset..offset + self.len()])
    }

    /// The index of the child with type id `type_id`.
    fn child_index(&self, type_id: i8) -> usize {
        match self.parts().1 {
            Some(ids) => ids
                .iter()
                .position(|id| *id == type_id as i32)
                .unwrap_or_else(|| unreachable!()),
            None => type_id as usize,
        }
    }

    /// The type id of slot `i`.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn type_id(&self, i: usize) -> i8 {
        self.types()[i]
    }

    /// The child and the index in the child of slot `i`.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn index(&self, i: usize) -> (usize, usize) {
        let field = self.child_index(self.type_id(i));
        let index = match self.offsets() {
            Some(offsets) => offsets[i] as usize,
            None => self.data.offset() + i,
        };
        (field, index)
    }

    /// The type id of slot `i` and the value of the child slot it selects.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn value(&self, i: usize) -> Scalar {
        let (field, index) = self.index(i);
        Scalar::Union(self.type_id(i), Box::new(self.fields[field].scalar(index)))
    }

    /// Returns an iterator over the slots of this array.
    pub fn iter(&self) -> ArrayIter<Self> {
        ArrayIter::new(self)
    }

    /// Returns a zero-copy slice of this array. The children are not sliced.
    /// # Panics
    /// Panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            data: self.data.slice(offset, length),
            fields: self.fields.clone(),
        }
    }
}

impl<'a> ArrayAccessor<'a> for UnionArray {
    type Item = Scalar;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn is_valid(&self, _: usize) -> bool {
        true
    }

    #[inline]
    fn value(&'a self, i: usize) -> Scalar {
        UnionArray::value(self, i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Int32Array, Utf8Array};

    fn fields() -> Vec<Field> {
        vec![
            Field::new("a", DataType::Int32, true),
            Field::new("b", DataType::Utf8, true),
        ]
    }

    #[test]
    fn dense() {
        let data_type = DataType::Union(fields(), Some(vec![3, 5]), UnionMode::Dense);
        let array = UnionArray::from_data(
            data_type,
            Buffer::from_slice_ref(&[3i8, 5, 3]),
            Some(Buffer::from_slice_ref(&[0i32, 0, 1])),
            vec![
                Int32Array::from(vec![Some(1), None]).into(),
                Utf8Array::<i32>::from_slice(["x"]).into(),
            ],
        )
        .unwrap();
        assert_eq!(array.null_count(), 0);
        assert_eq!(
            array.iter().collect::<Vec<_>>(),
            vec![
                Some(Scalar::Union(3, Box::new(Scalar::Int32(1)))),
                Some(Scalar::Union(5, Box::new(Scalar::from("x")))),
                Some(Scalar::Union(3, Box::new(Scalar::Null))),
            ]
        );
        let sliced = array.slice(1, 2);
        assert_eq!(sliced.index(1), (0, 1));
    }

    #[test]
    fn sparse() {
        let data_type = DataType::Union(fields(), None, UnionMode::Sparse);
        let array = UnionArray::from_data(
            data_type,
            Buffer::from_slice_ref(&[1i8, 0]),
            None,
            vec![
                Int32Array::from_slice([1, 2]).into(),
                Utf8Array::<i32>::from_slice(["x", "y"]).into(),
            ],
        )
        .unwrap();
        assert_eq!(array.value(0), Scalar::Union(1, Box::new(Scalar::from("x"))));
        assert_eq!(array.slice(1, 1).index(0), (0, 1));

        let missing_offsets = UnionArray::from_data(
            DataType::Union(fields(), None, UnionMode::Dense),
            Buffer::from_slice_ref(&[1i8, 0]),
            None,
            vec![],
        );
        assert!(missing_offsets.is_err());
    }
}
