// ABOUTME: Defines BSON element type tags and the per-type validation dispatch table.
// ABOUTME: Type tags are the byte values written in BSON element headers.

/// Type tags for BSON elements.
/// Values as written in element headers.
pub mod element_type {
    pub const EOO: u8 = 0x00;
    pub const DOUBLE: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const OBJECT: u8 = 0x03;
    pub const ARRAY: u8 = 0x04;
    pub const BINARY: u8 = 0x05;
    pub const UNDEFINED: u8 = 0x06;
    pub const OBJECT_ID: u8 = 0x07;
    pub const BOOL: u8 = 0x08;
    pub const DATE: u8 = 0x09;
    pub const NULL: u8 = 0x0a;
    pub const REGEX: u8 = 0x0b;
    pub const DB_POINTER: u8 = 0x0c;
    pub const JAVASCRIPT: u8 = 0x0d;
    pub const SYMBOL: u8 = 0x0e;
    pub const CODE_W_SCOPE: u8 = 0x0f;
    pub const INT32: u8 = 0x10;
    pub const TIMESTAMP: u8 = 0x11;
    pub const INT64: u8 = 0x12;
    pub const DECIMAL128: u8 = 0x13;

    // MinKey is -1 as a signed byte
    pub const MIN_KEY: u8 = 0xff;
    pub const MAX_KEY: u8 = 0x7f;

    /// Highest type tag covered by the dispatch table.
    pub const JS_TYPE_MAX: u8 = DECIMAL128;

    /// Human-readable name of a type tag, if it is a known BSON type.
    pub const fn name(code: u8) -> Option<&'static str> {
        Some(match code {
            EOO => "EOO",
            DOUBLE => "double",
            STRING => "string",
            OBJECT => "object",
            ARRAY => "array",
            BINARY => "binData",
            UNDEFINED => "undefined",
            OBJECT_ID => "objectId",
            BOOL => "bool",
            DATE => "date",
            NULL => "null",
            REGEX => "regex",
            DB_POINTER => "dbPointer",
            JAVASCRIPT => "javascript",
            SYMBOL => "symbol",
            CODE_W_SCOPE => "javascriptWithScope",
            INT32 => "int",
            TIMESTAMP => "timestamp",
            INT64 => "long",
            DECIMAL128 => "decimal",
            MIN_KEY => "minKey",
            MAX_KEY => "maxKey",
            _ => return None,
        })
    }
}

/// How the validator consumes the value of an element of a given type.
///
/// The `Skip*` ordinals encode the number of 4-byte words to skip, so the
/// byte count is `style as usize * 4`. Do not reorder them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValidationStyle {
    /// The element only consists of the type byte and field name.
    Skip0 = 0,
    Skip4 = 1,
    Skip8 = 2,
    Skip12 = 3,
    Skip16 = 4,
    /// An int32 length (including the NUL) and the string bytes follow.
    String = 5,
    /// The element opens a new nested object or array.
    ObjectOrArray = 6,
    /// Needs type-specific handling.
    Special = 7,
}

impl ValidationStyle {
    /// Number of value bytes for the fixed-size styles.
    #[inline]
    pub const fn skip_len(self) -> Option<usize> {
        if (self as u8) <= ValidationStyle::Skip16 as u8 {
            Some(self as usize * 4)
        } else {
            None
        }
    }
}

/// Dispatch table indexed by type tag, padded and aligned to 32 bytes.
#[repr(C, align(32))]
pub struct TypeInfoTable(pub [ValidationStyle; 32]);

const _: () = assert!(std::mem::size_of::<TypeInfoTable>() == 32);

pub static TYPE_INFO_TABLE: TypeInfoTable = {
    use ValidationStyle::{ObjectOrArray, Skip0, Skip12, Skip16, Skip4, Skip8, Special, String};
    let mut table = [Special; 32];
    table[element_type::DOUBLE as usize] = Skip8;
    table[element_type::STRING as usize] = String;
    table[element_type::OBJECT as usize] = ObjectOrArray;
    table[element_type::ARRAY as usize] = ObjectOrArray;
    // BinData has a subtype byte outside its length
    table[element_type::UNDEFINED as usize] = Skip0;
    table[element_type::OBJECT_ID as usize] = Skip12;
    // Bool must be 0 or 1
    table[element_type::DATE as usize] = Skip8;
    table[element_type::NULL as usize] = Skip0;
    // Regex is two cstrings, DBPointer is a string plus an ObjectId
    table[element_type::JAVASCRIPT as usize] = String;
    table[element_type::SYMBOL as usize] = String;
    // CodeWScope opens two frames
    table[element_type::INT32 as usize] = Skip4;
    table[element_type::TIMESTAMP as usize] = Skip8;
    table[element_type::INT64 as usize] = Skip8;
    table[element_type::DECIMAL128 as usize] = Skip16;
    TypeInfoTable(table)
};

/// Look up the validation style of a type tag within the table range.
#[inline]
pub fn style_of(code: u8) -> ValidationStyle {
    if code > element_type::JS_TYPE_MAX {
        return ValidationStyle::Special;
    }
    TYPE_INFO_TABLE.0[code as usize]
}

/// Resource limits and fixed sizes.
pub mod limits {
    /// Smallest possible document: a 4-byte length and the EOO byte.
    pub const MIN_DOCUMENT_SIZE: usize = 5;

    /// Size of an ObjectId in bytes.
    pub const OBJECT_ID_SIZE: usize = 12;

    /// Frame slots available to the fast engine.
    pub const FAST_FRAME_CAPACITY: usize = 32;

    /// Default maximum nesting depth.
    pub const DEFAULT_MAX_DEPTH: usize = 200;

    /// Smallest configurable maximum nesting depth.
    pub const MAX_DEPTH_FLOOR: usize = 21;

    /// Largest configurable maximum nesting depth.
    pub const MAX_DEPTH_CEILING: usize = 1000;
}
