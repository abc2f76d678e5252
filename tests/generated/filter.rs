// This file was auto-generated from filter.pb by protodec. Do not edit.

use protodec as __protodec;

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: i32,
    pub name: ::std::string::String,
    pub values: ::std::vec::Vec<f32>,
    pub deltas: ::std::vec::Vec<i64>,
    pub limit: u64,
    pub ratio: f64,
    pub mode: i32,
    pub child: Range,
    pub ranges: ::std::vec::Vec<Range>,
    pub r#type: ::std::vec::Vec<u8>,

    pub has_id: bool,
    pub has_name: bool,
    pub has_limit: bool,
    pub has_ratio: bool,
    pub has_mode: bool,
    pub has_child: bool,
    pub has_type: bool,
}

impl ::core::default::Default for Filter {
    fn default() -> Self {
        Self {
            id: ::core::default::Default::default(),
            name: ::core::default::Default::default(),
            values: ::core::default::Default::default(),
            deltas: ::core::default::Default::default(),
            limit: 100,
            ratio: 0.5_f64,
            mode: 2,
            child: ::core::default::Default::default(),
            ranges: ::core::default::Default::default(),
            r#type: b"ab\x01".to_vec(),
            has_id: false,
            has_name: false,
            has_limit: false,
            has_ratio: false,
            has_mode: false,
            has_child: false,
            has_type: false,
        }
    }
}

impl __protodec::DecodeMessage for Filter {
    fn decode_fields(&mut self, fields: &mut __protodec::FieldDispatcher<'_>) -> __protodec::Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_integer_field(tag.wire_type, &mut self.id, &mut self.has_id)?,
                2 => fields.read_bytes_field(tag.wire_type, &mut self.name, &mut self.has_name)?,
                3 => fields.read_repeated_float_field(tag.wire_type, __protodec::WireType::Fixed32, &mut self.values)?,
                4 => fields.read_repeated_zigzag_field(tag.wire_type, __protodec::WireType::Varint, &mut self.deltas)?,
                5 => fields.read_integer_field(tag.wire_type, &mut self.limit, &mut self.has_limit)?,
                6 => fields.read_float_field(tag.wire_type, &mut self.ratio, &mut self.has_ratio)?,
                7 => fields.read_integer_field(tag.wire_type, &mut self.mode, &mut self.has_mode)?,
                8 => fields.read_message_field(tag.wire_type, &mut self.child, &mut self.has_child)?,
                9 => fields.read_repeated_message_field(tag.wire_type, &mut self.ranges)?,
                10 => fields.read_bytes_field(tag.wire_type, &mut self.r#type, &mut self.has_type)?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        fields.check_required(self.has_id, "Filter", "id")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Range {
    pub lo: i32,
    pub hi: u64,
    pub open: bool,
    pub next: ::core::option::Option<::std::boxed::Box<Range>>,

    pub has_lo: bool,
    pub has_hi: bool,
    pub has_open: bool,
    pub has_next: bool,
}

impl __protodec::DecodeMessage for Range {
    fn decode_fields(&mut self, fields: &mut __protodec::FieldDispatcher<'_>) -> __protodec::Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_integer_field(tag.wire_type, &mut self.lo, &mut self.has_lo)?,
                2 => fields.read_integer_field(tag.wire_type, &mut self.hi, &mut self.has_hi)?,
                3 => fields.read_integer_field(tag.wire_type, &mut self.open, &mut self.has_open)?,
                4 => fields.read_message_field(tag.wire_type, &mut self.next, &mut self.has_next)?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        fields.check_required(self.has_lo, "Range", "lo")?;
        Ok(())
    }
}
