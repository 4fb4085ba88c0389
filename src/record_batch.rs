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

//! A two-dimensional batch of column-oriented data with a defined
//! [schema](crate::datatypes::Schema).

use std::sync::Arc;

use crate::array::{Array, StructArray};
use crate::datatypes::{DataType, Schema};
use crate::error::{Error, Result};

/// A two-dimensional batch of column-oriented data with a defined
/// [schema](crate::datatypes::Schema).
///
/// A [`RecordBatch`] is a sequence of arrays, the columns, all of the same length, and a
/// schema with one field per column whose data type matches the column's.
///
/// Record batches are the unit of interchange of this crate: they are immutable and cheap
/// to clone, since both the schema and the buffers of the columns are shared.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordBatch {
    schema: Arc<Schema>,
    columns: Vec<Array>,
    num_rows: usize,
}

impl RecordBatch {
    /// Creates a [`RecordBatch`] from a schema and columns.
    ///
    /// Expects the following:
    ///  * at least one column (use [`RecordBatch::try_new_with_options`] with a row count
    ///    for a batch without columns)
    ///  * the schema and the columns to have equal lengths and matching data types
    ///  * each column to have the same length
    ///
    /// # Errors
    /// Errors with [`Error::SchemaMismatch`] naming the first column violating the above.
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use columnar::array::Int32Array;
    /// use columnar::datatypes::{Schema, Field, DataType};
    /// use columnar::record_batch::RecordBatch;
    ///
    /// # fn main() -> columnar::error::Result<()> {
    /// let id_array = Int32Array::from_slice([1, 2, 3, 4, 5]);
    /// let schema = Schema::new(vec![Field::new("id", DataType::Int32, false)]);
    ///
    /// let batch = RecordBatch::try_new(Arc::new(schema), vec![id_array.into()])?;
    /// assert_eq!(batch.num_rows(), 5);
    /// # Ok(())
    /// # }
    /// ```
    pub fn try_new(schema: Arc<Schema>, columns: Vec<Array>) -> Result<Self> {
        Self::try_new_with_options(schema, columns, &RecordBatchOptions::default())
    }

    /// Creates a [`RecordBatch`] from a schema and columns, with additional options,
    /// such as whether to strictly validate the names of nested fields.
    ///
    /// See [`RecordBatch::try_new`] for the expected conditions.
    pub fn try_new_with_options(
        schema: Arc<Schema>,
        columns: Vec<Array>,
        options: &RecordBatchOptions,
    ) -> Result<Self> {
        let num_rows = Self::validate_new_batch(&schema, &columns, options)?;
        Ok(Self {
            schema,
            columns,
            num_rows,
        })
    }

    /// Creates a new [`RecordBatch`] with no rows.
    pub fn new_empty(schema: Arc<Schema>) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| Array::new_empty(field.data_type()))
            .collect();
        Self {
            schema,
            columns,
            num_rows: 0,
        }
    }

    /// Validates the schema and columns using [`RecordBatchOptions`], returning the
    /// number of rows.
    fn validate_new_batch(
        schema: &Schema,
        columns: &[Array],
        options: &RecordBatchOptions,
    ) -> Result<usize> {
        if schema.fields().len() != columns.len() {
            return Err(Error::SchemaMismatch(format!(
                "number of columns ({}) must match number of fields ({}) in schema",
                columns.len(),
                schema.fields().len(),
            )));
        }
        let num_rows = match (options.row_count, columns.first()) {
            (Some(row_count), _) => row_count,
            (None, Some(column)) => column.len(),
            (None, None) => {
                return Err(Error::SchemaMismatch(
                    "a record batch without columns must declare its row count".to_string(),
                ))
            }
        };

        for (field, column) in schema.fields().iter().zip(columns) {
            if column.len() != num_rows {
                return Err(Error::SchemaMismatch(format!(
                    "column \"{}\" has {} rows, but the batch has {}",
                    field.name(),
                    column.len(),
                    num_rows
                )));
            }
            let matches = if options.match_field_names {
                column.data_type() == field.data_type()
            } else {
                column.data_type().equals_datatype(field.data_type())
            };
            if !matches {
                return Err(Error::SchemaMismatch(format!(
                    "column \"{}\" is of type {:?}, but its field is of type {:?}",
                    field.name(),
                    column.data_type(),
                    field.data_type(),
                )));
            }
        }
        Ok(num_rows)
    }

    /// Returns the [`Schema`] of the record batch.
    #[inline]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the number of columns in the record batch.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows in each column.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Get a reference to a column's array by index.
    /// # Errors
    /// Errors with [`Error::IndexOutOfRange`] iff `index >= self.num_columns()`.
    pub fn column(&self, index: usize) -> Result<&Array> {
        self.columns.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.columns.len(),
        })
    }

    /// Get a reference to the first column named `name`.
    /// # Errors
    /// Errors with [`Error::InvalidArgument`] iff no field is named `name`.
    pub fn column_by_name(&self, name: &str) -> Result<&Array> {
        let index = self.schema.index_of(name)?;
        Ok(&self.columns[index])
    }

    /// Get a reference to all columns in the record batch.
    #[inline]
    pub fn columns(&self) -> &[Array] {
        &self.columns
    }

    /// Returns a zero-copy slice of every column, with `length` rows starting at `offset`.
    /// # Panics
    /// Panics iff `offset + length > self.num_rows()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        assert!(
            offset
                .checked_add(length)
                .map_or(false, |end| end <= self.num_rows),
            "the slice must be within the rows of the batch"
        );
        Self {
            schema: self.schema.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| column.slice(offset, length))
                .collect(),
            num_rows: length,
        }
    }

    /// Deconstructs this batch into its schema and columns.
    pub fn into_parts(self) -> (Arc<Schema>, Vec<Array>) {
        (self.schema, self.columns)
    }
}

/// Options that control the behaviour used when creating a [`RecordBatch`].
#[derive(Debug, Clone, Default)]
pub struct RecordBatchOptions {
    /// Match field names of structs and lists. If set to `true`, the data type of every
    /// column must equal the one of its field, names of nested fields included.
    pub match_field_names: bool,
    /// The number of rows of the batch. Required for batches without columns.
    pub row_count: Option<usize>,
}

impl TryFrom<StructArray> for RecordBatch {
    type Error = Error;

    /// Creates a record batch with one column per child of the struct, without copying.
    /// The top-level validity cannot be represented by a record batch.
    /// # Errors
    /// Errors with [`Error::SchemaMismatch`] iff the struct has null slots.
    fn try_from(array: StructArray) -> Result<Self> {
        if array.null_count() > 0 {
            return Err(Error::SchemaMismatch(
                "a struct array with null slots cannot be converted to a record batch"
                    .to_string(),
            ));
        }
        let num_rows = array.len();
        let (fields, columns, _) = array.into_parts();
        Ok(Self {
            schema: Arc::new(Schema::new(fields)),
            columns,
            num_rows,
        })
    }
}

impl From<RecordBatch> for StructArray {
    /// Creates a struct array with one child per column of the batch, without copying.
    /// The schema-level metadata is dropped.
    fn from(batch: RecordBatch) -> Self {
        let fields = batch.schema.fields().clone();
        // Safety: the children of a batch are the columns of its schema and all have
        // `num_rows` slots
        let data = unsafe {
            crate::array::ArrayData::new_unchecked(
                DataType::Struct(fields),
                batch.num_rows,
                0,
                0,
                None,
                vec![],
                batch.columns.into_iter().map(|c| c.into_data()).collect(),
            )
        };
        // the data is a struct
        match StructArray::try_new(data) {
            Ok(array) => array,
            Err(_) => unreachable!(),
        }
    }
}

/// Trait for types that can read [`RecordBatch`]es.
pub trait RecordBatchReader: Iterator<Item = Result<RecordBatch>> {
    /// Returns the schema of this [`RecordBatchReader`].
    ///
    /// Implementations must guarantee that every [`RecordBatch`] they return has this
    /// schema.
    fn schema(&self) -> &Arc<Schema>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Int32Array, Utf8Array};
    use crate::datatypes::Field;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("a", DataType::Int32, false),
            Field::new("b", DataType::Utf8, true),
        ]))
    }

    #[test]
    fn basics() {
        let batch = RecordBatch::try_new(
            schema(),
            vec![
                Int32Array::from_slice([1, 2, 3]).into(),
                Utf8Array::<i32>::from(vec![Some("x"), None, Some("z")]).into(),
            ],
        )
        .unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.column_by_name("b").unwrap().null_count(), 1);
        assert!(matches!(
            batch.column(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));

        let sliced = batch.slice(1, 2);
        assert_eq!(sliced.num_rows(), 2);
        assert_eq!(sliced.column(0).unwrap().len(), 2);
    }

    #[test]
    fn wrong_length() {
        let result = RecordBatch::try_new(
            schema(),
            vec![
                Int32Array::from_slice([1, 2, 3]).into(),
                Utf8Array::<i32>::from_slice(["x"]).into(),
            ],
        );
        match result {
            Err(Error::SchemaMismatch(message)) => assert!(message.contains("\"b\"")),
            _ => panic!("expected a schema mismatch"),
        }
    }

    #[test]
    fn wrong_type() {
        let result = RecordBatch::try_new(
            schema(),
            vec![
                Int32Array::from_slice([1]).into(),
                Int32Array::from_slice([1]).into(),
            ],
        );
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn without_columns() {
        let schema = Arc::new(Schema::default());
        assert!(RecordBatch::try_new(schema.clone(), vec![]).is_err());

        let options = RecordBatchOptions {
            row_count: Some(10),
            ..Default::default()
        };
        let batch = RecordBatch::try_new_with_options(schema, vec![], &options).unwrap();
        assert_eq!(batch.num_rows(), 10);
    }

    #[test]
    fn struct_round_trip() {
        let array = StructArray::try_from(vec![(
            Field::new("a", DataType::Int32, false),
            Array::from(Int32Array::from_slice([1, 2, 3])),
        )])
        .unwrap()
        .slice(1, 2);
        let batch = RecordBatch::try_from(array.clone()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(
            batch.column(0).unwrap(),
            &Array::from(Int32Array::from_slice([2, 3]))
        );
        assert_eq!(StructArray::from(batch), array);
    }
}
