// ABOUTME: Raw BSON document builder shared by the integration tests.
// ABOUTME: Writes bytes directly so tests can produce both valid and corrupt documents.

#![allow(dead_code)]

use bson_validate::element_type;

/// Builds the element list of one document, then frames it with a length
/// prefix and EOO byte.
#[derive(Default, Clone)]
pub struct DocBuilder {
    elements: Vec<u8>,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, type_byte: u8, name: &str, value: &[u8]) -> Self {
        self.elements.push(type_byte);
        self.elements.extend_from_slice(name.as_bytes());
        self.elements.push(0);
        self.elements.extend_from_slice(value);
        self
    }

    pub fn double(self, name: &str, value: f64) -> Self {
        self.raw(element_type::DOUBLE, name, &value.to_le_bytes())
    }

    pub fn string(self, name: &str, value: &str) -> Self {
        self.raw(element_type::STRING, name, &string_value(value))
    }

    pub fn document(self, name: &str, doc: &DocBuilder) -> Self {
        self.raw(element_type::OBJECT, name, &doc.build())
    }

    pub fn array(self, name: &str, doc: &DocBuilder) -> Self {
        self.raw(element_type::ARRAY, name, &doc.build())
    }

    pub fn binary(self, name: &str, subtype: u8, bytes: &[u8]) -> Self {
        let mut value = (bytes.len() as u32).to_le_bytes().to_vec();
        value.push(subtype);
        value.extend_from_slice(bytes);
        self.raw(element_type::BINARY, name, &value)
    }

    pub fn undefined(self, name: &str) -> Self {
        self.raw(element_type::UNDEFINED, name, &[])
    }

    pub fn object_id(self, name: &str, oid: [u8; 12]) -> Self {
        self.raw(element_type::OBJECT_ID, name, &oid)
    }

    pub fn bool_byte(self, name: &str, value: u8) -> Self {
        self.raw(element_type::BOOL, name, &[value])
    }

    pub fn date(self, name: &str, millis: i64) -> Self {
        self.raw(element_type::DATE, name, &millis.to_le_bytes())
    }

    pub fn null(self, name: &str) -> Self {
        self.raw(element_type::NULL, name, &[])
    }

    pub fn regex(self, name: &str, pattern: &str, options: &str) -> Self {
        let mut value = pattern.as_bytes().to_vec();
        value.push(0);
        value.extend_from_slice(options.as_bytes());
        value.push(0);
        self.raw(element_type::REGEX, name, &value)
    }

    pub fn db_pointer(self, name: &str, namespace: &str, oid: [u8; 12]) -> Self {
        let mut value = string_value(namespace);
        value.extend_from_slice(&oid);
        self.raw(element_type::DB_POINTER, name, &value)
    }

    pub fn javascript(self, name: &str, code: &str) -> Self {
        self.raw(element_type::JAVASCRIPT, name, &string_value(code))
    }

    pub fn symbol(self, name: &str, symbol: &str) -> Self {
        self.raw(element_type::SYMBOL, name, &string_value(symbol))
    }

    pub fn code_w_scope(self, name: &str, code: &str, scope: &DocBuilder) -> Self {
        let value = code_w_scope_value(code, scope);
        self.raw(element_type::CODE_W_SCOPE, name, &value)
    }

    pub fn int32(self, name: &str, value: i32) -> Self {
        self.raw(element_type::INT32, name, &value.to_le_bytes())
    }

    pub fn timestamp(self, name: &str, increment: u32, seconds: u32) -> Self {
        let mut value = increment.to_le_bytes().to_vec();
        value.extend_from_slice(&seconds.to_le_bytes());
        self.raw(element_type::TIMESTAMP, name, &value)
    }

    pub fn int64(self, name: &str, value: i64) -> Self {
        self.raw(element_type::INT64, name, &value.to_le_bytes())
    }

    pub fn decimal128(self, name: &str, bits: [u8; 16]) -> Self {
        self.raw(element_type::DECIMAL128, name, &bits)
    }

    pub fn min_key(self, name: &str) -> Self {
        self.raw(element_type::MIN_KEY, name, &[])
    }

    pub fn max_key(self, name: &str) -> Self {
        self.raw(element_type::MAX_KEY, name, &[])
    }

    /// Frame the elements with a correct length prefix and EOO byte.
    pub fn build(&self) -> Vec<u8> {
        let len = (self.elements.len() + 5) as i32;
        let mut out = len.to_le_bytes().to_vec();
        out.extend_from_slice(&self.elements);
        out.push(0);
        out
    }
}

pub fn string_value(value: &str) -> Vec<u8> {
    let mut out = ((value.len() + 1) as u32).to_le_bytes().to_vec();
    out.extend_from_slice(value.as_bytes());
    out.push(0);
    out
}

pub fn code_w_scope_value(code: &str, scope: &DocBuilder) -> Vec<u8> {
    let mut body = string_value(code);
    body.extend(scope.build());
    let mut value = ((body.len() + 4) as i32).to_le_bytes().to_vec();
    value.extend(body);
    value
}

/// `{ "a": { "a": ... {} } }` with `depth` levels below the top document.
pub fn nested(depth: usize) -> Vec<u8> {
    let mut doc = DocBuilder::new();
    for _ in 0..depth {
        doc = DocBuilder::new().document("a", &doc);
    }
    doc.build()
}

/// A document exercising every element type the fast engine handles.
pub fn sample_document() -> DocBuilder {
    let inner = DocBuilder::new()
        .string("city", "Springfield")
        .int32("zip", 12345)
        .array("tags", &DocBuilder::new().string("0", "x").string("1", "y"));
    DocBuilder::new()
        .int32("_id", 1)
        .double("pi", 3.25)
        .string("name", "validator")
        .document("address", &inner)
        .array("scores", &DocBuilder::new().int32("0", 1).int64("1", 2))
        .binary("bin", 0x04, &[1, 2, 3, 4])
        .undefined("undef")
        .object_id("oid", [7; 12])
        .bool_byte("yes", 1)
        .bool_byte("no", 0)
        .date("when", 1_600_000_000_000)
        .null("nothing")
        .regex("re", "^a.*z$", "im")
        .db_pointer("ref", "db.coll", [9; 12])
        .javascript("js", "function() { return 1; }")
        .symbol("sym", "s")
        .timestamp("ts", 1, 2)
        .int64("big", i64::MAX)
        .decimal128("dec", [0x11; 16])
        .min_key("lo")
        .max_key("hi")
}
