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

//! Flatbuffers tables of the metadata of IPC messages.
//!
//! ```text
//! table KeyValue { key: string; value: string; }
//! table Type {
//!   id: ubyte; unit: ubyte; size: int; timezone: string; key: ubyte; ordered: bool;
//!   mode: ubyte; type_ids: [int]; children: [Field]; value: Type;
//! }
//! table Field { name: string; nullable: bool; type: Type; metadata: [KeyValue]; }
//! table Schema { fields: [Field]; metadata: [KeyValue]; }
//! table RecordBatch { length: long; nodes: [long]; buffers: [long]; }
//! table Message {
//!   version: ushort; header: ubyte; schema: Schema; batch: RecordBatch; body_length: long;
//! }
//! root_type Message;
//! ```
//!
//! Every accessor assumes that the buffer was verified by [`root_as_message`].
use flatbuffers::{
    FlatBufferBuilder, Follow, ForwardsUOffset, InvalidFlatbuffer, Table, VOffsetT, Vector,
    Verifiable, Verifier, WIPOffset,
};

macro_rules! table {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq)]
        pub(crate) struct $name<'a> {
            _tab: Table<'a>,
        }

        impl<'a> Follow<'a> for $name<'a> {
            type Inner = $name<'a>;

            #[inline]
            unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
                Self {
                    _tab: Table::new(buf, loc),
                }
            }
        }
    };
}

/// The vtable offset of the `n`-th field of a table.
const fn slot(n: VOffsetT) -> VOffsetT {
    4 + 2 * n
}

pub(crate) type FieldVector<'a> = Vector<'a, ForwardsUOffset<Field<'a>>>;
pub(crate) type KeyValueVector<'a> = Vector<'a, ForwardsUOffset<KeyValue<'a>>>;

table!(
    /// A key-value pair of metadata.
    KeyValue
);

impl<'a> KeyValue<'a> {
    pub const VT_KEY: VOffsetT = slot(0);
    pub const VT_VALUE: VOffsetT = slot(1);

    #[inline]
    pub fn key(&self) -> Option<&'a str> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_KEY, None) }
    }

    #[inline]
    pub fn value(&self) -> Option<&'a str> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_VALUE, None) }
    }

    pub fn create<'b>(
        fbb: &mut FlatBufferBuilder<'b>,
        key: &str,
        value: &str,
    ) -> WIPOffset<KeyValue<'b>> {
        let key = fbb.create_string(key);
        let value = fbb.create_string(value);
        let start = fbb.start_table();
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_KEY, key);
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_VALUE, value);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }
}

impl Verifiable for KeyValue<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("key", Self::VT_KEY, false)?
            .visit_field::<ForwardsUOffset<&str>>("value", Self::VT_VALUE, false)?
            .finish();
        Ok(())
    }
}

table!(
    /// A logical data type. `id` selects the type; the remaining fields parametrize it.
    Type
);

/// The arguments of [`Type::create`].
#[derive(Default)]
pub(crate) struct TypeArgs<'a> {
    pub id: u8,
    pub unit: u8,
    pub size: i32,
    pub timezone: Option<WIPOffset<&'a str>>,
    pub key: u8,
    pub ordered: bool,
    pub mode: u8,
    pub type_ids: Option<WIPOffset<Vector<'a, i32>>>,
    pub children: Option<WIPOffset<FieldVector<'a>>>,
    pub value: Option<WIPOffset<Type<'a>>>,
}

impl<'a> Type<'a> {
    pub const VT_ID: VOffsetT = slot(0);
    pub const VT_UNIT: VOffsetT = slot(1);
    pub const VT_SIZE: VOffsetT = slot(2);
    pub const VT_TIMEZONE: VOffsetT = slot(3);
    pub const VT_KEY: VOffsetT = slot(4);
    pub const VT_ORDERED: VOffsetT = slot(5);
    pub const VT_MODE: VOffsetT = slot(6);
    pub const VT_TYPE_IDS: VOffsetT = slot(7);
    pub const VT_CHILDREN: VOffsetT = slot(8);
    pub const VT_VALUE: VOffsetT = slot(9);

    #[inline]
    pub fn id(&self) -> u8 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<u8>(Self::VT_ID, Some(0)) }.unwrap_or(0)
    }

    #[inline]
    pub fn unit(&self) -> u8 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<u8>(Self::VT_UNIT, Some(0)) }.unwrap_or(0)
    }

    #[inline]
    pub fn size(&self) -> i32 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<i32>(Self::VT_SIZE, Some(0)) }.unwrap_or(0)
    }

    #[inline]
    pub fn timezone(&self) -> Option<&'a str> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_TIMEZONE, None) }
    }

    #[inline]
    pub fn key(&self) -> u8 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<u8>(Self::VT_KEY, Some(0)) }.unwrap_or(0)
    }

    #[inline]
    pub fn ordered(&self) -> bool {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<bool>(Self::VT_ORDERED, Some(false)) }.unwrap_or(false)
    }

    #[inline]
    pub fn mode(&self) -> u8 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<u8>(Self::VT_MODE, Some(0)) }.unwrap_or(0)
    }

    #[inline]
    pub fn type_ids(&self) -> Option<Vector<'a, i32>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, i32>>>(Self::VT_TYPE_IDS, None)
        }
    }

    #[inline]
    pub fn children(&self) -> Option<FieldVector<'a>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<FieldVector<'a>>>(Self::VT_CHILDREN, None)
        }
    }

    #[inline]
    pub fn value(&self) -> Option<Type<'a>> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<Type>>(Self::VT_VALUE, None) }
    }

    pub fn create<'b>(fbb: &mut FlatBufferBuilder<'b>, args: &TypeArgs<'b>) -> WIPOffset<Type<'b>> {
        let start = fbb.start_table();
        if let Some(x) = args.value {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_VALUE, x);
        }
        if let Some(x) = args.children {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_CHILDREN, x);
        }
        if let Some(x) = args.type_ids {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_TYPE_IDS, x);
        }
        if let Some(x) = args.timezone {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_TIMEZONE, x);
        }
        fbb.push_slot::<i32>(Self::VT_SIZE, args.size, 0);
        fbb.push_slot::<u8>(Self::VT_ID, args.id, 0);
        fbb.push_slot::<u8>(Self::VT_UNIT, args.unit, 0);
        fbb.push_slot::<u8>(Self::VT_KEY, args.key, 0);
        fbb.push_slot::<bool>(Self::VT_ORDERED, args.ordered, false);
        fbb.push_slot::<u8>(Self::VT_MODE, args.mode, 0);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }
}

impl Verifiable for Type<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u8>("id", Self::VT_ID, false)?
            .visit_field::<u8>("unit", Self::VT_UNIT, false)?
            .visit_field::<i32>("size", Self::VT_SIZE, false)?
            .visit_field::<ForwardsUOffset<&str>>("timezone", Self::VT_TIMEZONE, false)?
            .visit_field::<u8>("key", Self::VT_KEY, false)?
            .visit_field::<bool>("ordered", Self::VT_ORDERED, false)?
            .visit_field::<u8>("mode", Self::VT_MODE, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("type_ids", Self::VT_TYPE_IDS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Field>>>>(
                "children",
                Self::VT_CHILDREN,
                false,
            )?
            .visit_field::<ForwardsUOffset<Type>>("value", Self::VT_VALUE, false)?
            .finish();
        Ok(())
    }
}

table!(
    /// A named, typed and nullable column.
    Field
);

impl<'a> Field<'a> {
    pub const VT_NAME: VOffsetT = slot(0);
    pub const VT_NULLABLE: VOffsetT = slot(1);
    pub const VT_TYPE: VOffsetT = slot(2);
    pub const VT_METADATA: VOffsetT = slot(3);

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_NAME, None) }
    }

    #[inline]
    pub fn nullable(&self) -> bool {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<bool>(Self::VT_NULLABLE, Some(false)) }.unwrap_or(false)
    }

    #[inline]
    pub fn type_(&self) -> Option<Type<'a>> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<Type>>(Self::VT_TYPE, None) }
    }

    #[inline]
    pub fn metadata(&self) -> Option<KeyValueVector<'a>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<KeyValueVector<'a>>>(Self::VT_METADATA, None)
        }
    }

    pub fn create<'b>(
        fbb: &mut FlatBufferBuilder<'b>,
        name: WIPOffset<&'b str>,
        nullable: bool,
        type_: WIPOffset<Type<'b>>,
        metadata: Option<WIPOffset<KeyValueVector<'b>>>,
    ) -> WIPOffset<Field<'b>> {
        let start = fbb.start_table();
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_NAME, name);
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_TYPE, type_);
        if let Some(x) = metadata {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_METADATA, x);
        }
        fbb.push_slot::<bool>(Self::VT_NULLABLE, nullable, false);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }
}

impl Verifiable for Field<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, true)?
            .visit_field::<bool>("nullable", Self::VT_NULLABLE, false)?
            .visit_field::<ForwardsUOffset<Type>>("type", Self::VT_TYPE, true)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<KeyValue>>>>(
                "metadata",
                Self::VT_METADATA,
                false,
            )?
            .finish();
        Ok(())
    }
}

table!(
    /// The schema of a stream or of a self-describing batch.
    Schema
);

impl<'a> Schema<'a> {
    pub const VT_FIELDS: VOffsetT = slot(0);
    pub const VT_METADATA: VOffsetT = slot(1);

    #[inline]
    pub fn fields(&self) -> Option<FieldVector<'a>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<FieldVector<'a>>>(Self::VT_FIELDS, None)
        }
    }

    #[inline]
    pub fn metadata(&self) -> Option<KeyValueVector<'a>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<KeyValueVector<'a>>>(Self::VT_METADATA, None)
        }
    }

    pub fn create<'b>(
        fbb: &mut FlatBufferBuilder<'b>,
        fields: WIPOffset<FieldVector<'b>>,
        metadata: Option<WIPOffset<KeyValueVector<'b>>>,
    ) -> WIPOffset<Schema<'b>> {
        let start = fbb.start_table();
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_FIELDS, fields);
        if let Some(x) = metadata {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_METADATA, x);
        }
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }
}

impl Verifiable for Schema<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Field>>>>(
                "fields",
                Self::VT_FIELDS,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<KeyValue>>>>(
                "metadata",
                Self::VT_METADATA,
                false,
            )?
            .finish();
        Ok(())
    }
}

table!(
    /// The layout of the body of a batch.
    ///
    /// `nodes` holds 4 entries per array node, in pre-order: length, null count, offset and
    /// whether the node has a validity bitmap (0 or 1).
    /// `buffers` holds 2 entries per buffer, in the order they are consumed by the nodes:
    /// offset within the body and length, in bytes.
    RecordBatch
);

impl<'a> RecordBatch<'a> {
    pub const VT_LENGTH: VOffsetT = slot(0);
    pub const VT_NODES: VOffsetT = slot(1);
    pub const VT_BUFFERS: VOffsetT = slot(2);

    #[inline]
    pub fn length(&self) -> i64 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<i64>(Self::VT_LENGTH, Some(0)) }.unwrap_or(0)
    }

    #[inline]
    pub fn nodes(&self) -> Option<Vector<'a, i64>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, i64>>>(Self::VT_NODES, None)
        }
    }

    #[inline]
    pub fn buffers(&self) -> Option<Vector<'a, i64>> {
        // Safety: verified by `root_as_message`
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, i64>>>(Self::VT_BUFFERS, None)
        }
    }

    pub fn create<'b>(
        fbb: &mut FlatBufferBuilder<'b>,
        length: i64,
        nodes: &[i64],
        buffers: &[i64],
    ) -> WIPOffset<RecordBatch<'b>> {
        let nodes = fbb.create_vector(nodes);
        let buffers = fbb.create_vector(buffers);
        let start = fbb.start_table();
        fbb.push_slot::<i64>(Self::VT_LENGTH, length, 0);
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_NODES, nodes);
        fbb.push_slot_always::<WIPOffset<_>>(Self::VT_BUFFERS, buffers);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }
}

impl Verifiable for RecordBatch<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<i64>("length", Self::VT_LENGTH, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i64>>>("nodes", Self::VT_NODES, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i64>>>("buffers", Self::VT_BUFFERS, false)?
            .finish();
        Ok(())
    }
}

/// The kind of content of a [`Message`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MessageHeader {
    Schema,
    RecordBatch,
}

impl MessageHeader {
    const SCHEMA: u8 = 1;
    const RECORD_BATCH: u8 = 2;
}

table!(
    /// The metadata of a message.
    Message
);

impl<'a> Message<'a> {
    pub const VT_VERSION: VOffsetT = slot(0);
    pub const VT_HEADER: VOffsetT = slot(1);
    pub const VT_SCHEMA: VOffsetT = slot(2);
    pub const VT_BATCH: VOffsetT = slot(3);
    pub const VT_BODY_LENGTH: VOffsetT = slot(4);

    #[inline]
    pub fn version(&self) -> u16 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<u16>(Self::VT_VERSION, Some(0)) }.unwrap_or(0)
    }

    /// The kind of this message, [`None`] when unknown.
    #[inline]
    pub fn header(&self) -> Option<MessageHeader> {
        // Safety: verified by `root_as_message`
        match unsafe { self._tab.get::<u8>(Self::VT_HEADER, Some(0)) } {
            Some(MessageHeader::SCHEMA) => Some(MessageHeader::Schema),
            Some(MessageHeader::RECORD_BATCH) => Some(MessageHeader::RecordBatch),
            _ => None,
        }
    }

    #[inline]
    pub fn schema(&self) -> Option<Schema<'a>> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<Schema>>(Self::VT_SCHEMA, None) }
    }

    #[inline]
    pub fn batch(&self) -> Option<RecordBatch<'a>> {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<ForwardsUOffset<RecordBatch>>(Self::VT_BATCH, None) }
    }

    #[inline]
    pub fn body_length(&self) -> i64 {
        // Safety: verified by `root_as_message`
        unsafe { self._tab.get::<i64>(Self::VT_BODY_LENGTH, Some(0)) }.unwrap_or(0)
    }

    pub fn create<'b>(
        fbb: &mut FlatBufferBuilder<'b>,
        version: u16,
        header: MessageHeader,
        schema: Option<WIPOffset<Schema<'b>>>,
        batch: Option<WIPOffset<RecordBatch<'b>>>,
        body_length: i64,
    ) -> WIPOffset<Message<'b>> {
        let header = match header {
            MessageHeader::Schema => MessageHeader::SCHEMA,
            MessageHeader::RecordBatch => MessageHeader::RECORD_BATCH,
        };
        let start = fbb.start_table();
        fbb.push_slot::<i64>(Self::VT_BODY_LENGTH, body_length, 0);
        if let Some(x) = schema {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_SCHEMA, x);
        }
        if let Some(x) = batch {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_BATCH, x);
        }
        fbb.push_slot::<u16>(Self::VT_VERSION, version, 0);
        fbb.push_slot::<u8>(Self::VT_HEADER, header, 0);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }
}

impl Verifiable for Message<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u16>("version", Self::VT_VERSION, false)?
            .visit_field::<u8>("header", Self::VT_HEADER, false)?
            .visit_field::<ForwardsUOffset<Schema>>("schema", Self::VT_SCHEMA, false)?
            .visit_field::<ForwardsUOffset<RecordBatch>>("batch", Self::VT_BATCH, false)?
            .visit_field::<i64>("body_length", Self::VT_BODY_LENGTH, false)?
            .finish();
        Ok(())
    }
}

/// Verifies `buf` and returns the [`Message`] at its root.
#[inline]
pub(crate) fn root_as_message(buf: &[u8]) -> Result<Message, InvalidFlatbuffer> {
    flatbuffers::root::<Message>(buf)
}
