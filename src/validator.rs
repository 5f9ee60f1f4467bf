// ABOUTME: Iterative BSON validation engine, generic over its frame storage.
// ABOUTME: The fast instantiation skips diagnostics; the precise one tracks context.

#![allow(clippy::cast_sign_loss)]

use crate::config::ValidatorConfig;
use crate::cursor::Cursor;
use crate::element::{self, Element};
use crate::error::{Error, Result, ValidationError};
use crate::frame::{FastFrames, Frame, FrameKind, FrameStack, PreciseFrames};
use crate::types::{element_type, limits, style_of, ValidationStyle};

/// Validates one buffer.
///
/// Nesting is handled with an explicit frame stack rather than recursion, so
/// native stack usage is independent of document depth. The outer loop pops
/// frames and the inner loop scans the elements of the current frame.
pub(crate) struct ValidateEngine<'a, S: FrameStack> {
    data: &'a [u8],
    max_frames: usize,
    /// Type byte of the element being validated; only its name is known good.
    curr_elem: Option<usize>,
    curr_frame: usize,
    frames: S,
}

/// Outcome of a single local check.
type Check<T = ()> = std::result::Result<T, Error>;

pub(crate) type FastEngine<'a> = ValidateEngine<'a, FastFrames>;
pub(crate) type PreciseEngine<'a> = ValidateEngine<'a, PreciseFrames>;

impl<'a, S: FrameStack> ValidateEngine<'a, S> {
    pub(crate) fn new(data: &'a [u8], config: &ValidatorConfig) -> Self {
        let max_frames = config.max_frames();
        Self {
            data,
            max_frames,
            curr_elem: None,
            curr_frame: 0,
            frames: S::allocate(max_frames, data.len()),
        }
    }

    /// Run the validation, attaching context to any failure in precise mode.
    pub(crate) fn validate(mut self) -> Result<()> {
        self.validate_document()
            .map_err(|error| ValidationError::new(error, self.context()))
    }

    fn validate_document(&mut self) -> Check {
        // A flat document uses one frame.
        if self.frames.as_ref().len() > self.max_frames {
            return Err(Error::CannotEnforceMaxDepth);
        }
        if self.data.len() < limits::MIN_DOCUMENT_SIZE {
            return Err(Error::DocumentTooShort);
        }

        // Signed, so declared lengths of 2GB and more are rejected.
        let mut cursor = Cursor::new(self.data, 0, self.data.len());
        let len = cursor.read_i32()?;
        if len < limits::MIN_DOCUMENT_SIZE as i32 {
            return Err(Error::DocumentTooShort);
        }
        let end = len as usize;
        if end > self.data.len() {
            return Err(Error::IncorrectDocumentLength);
        }
        self.frames.as_mut()[0].open(end, FrameKind::Document, None);
        if self.data[end - 1] != 0 {
            return Err(Error::NotTerminatedWithEoo);
        }
        self.validate_iterative(Cursor::new(self.data, cursor.pos, end))
    }

    fn validate_iterative(&mut self, mut cursor: Cursor<'a>) -> Check {
        loop {
            if cursor.pos >= cursor.end {
                return Err(Error::SizeLargerThanBuffer);
            }

            // The EOO byte is zero like a string terminator, so an empty
            // type-and-name run marks the end of the object.
            loop {
                let len = cursor.strlen()?;
                if len == 0 {
                    break;
                }
                let start = cursor.pos;
                let type_byte = self.data[start];
                self.curr_elem = Some(start);
                cursor.pos += len + 1;
                cursor = self.validate_elem(cursor, type_byte)?;

                // Remember a validated top-level _id for the error context.
                if S::PRECISE && self.curr_frame == 0 && &self.data[start + 1..start + len] == b"_id" {
                    self.frames.as_mut()[0].set_id(Element::new(start, cursor.pos - start));
                }
                debug_assert!(cursor.pos < cursor.end);
            }

            // Skip the EOO byte; it must sit exactly at the declared end.
            cursor.pos += 1;
            if cursor.pos != self.current().end() {
                return Err(Error::IncorrectLength);
            }
            self.maybe_pop_code_w_scope(&cursor)?;
            if !self.pop_frame(&mut cursor) {
                return Ok(());
            }
        }
    }

    fn validate_elem(&mut self, mut cursor: Cursor<'a>, type_byte: u8) -> Check<Cursor<'a>> {
        let style = style_of(type_byte);
        if let Some(len) = style.skip_len() {
            cursor.skip(len)?;
            return Ok(cursor);
        }
        match style {
            ValidationStyle::String => {
                cursor.skip_string()?;
                Ok(cursor)
            }
            ValidationStyle::ObjectOrArray => self.push_frame(cursor, FrameKind::Nested),
            _ if S::PRECISE && type_byte == element_type::CODE_W_SCOPE => {
                self.push_code_w_scope(cursor)
            }
            _ => {
                validate_special(&mut cursor, type_byte)?;
                Ok(cursor)
            }
        }
    }

    #[inline]
    fn current(&self) -> S::Frame {
        self.frames.as_ref()[self.curr_frame]
    }

    /// Open a frame for the length-prefixed object at the cursor and return a
    /// cursor positioned at its first element, bounded by its end.
    fn push_frame(&mut self, mut cursor: Cursor<'a>, kind: FrameKind) -> Check<Cursor<'a>> {
        if self.curr_frame + 1 >= self.frames.as_ref().len() {
            return Err(Error::MaxDepthExceeded);
        }

        let obj = cursor.pos;
        let len = cursor.read_i32()?;
        if len < limits::MIN_DOCUMENT_SIZE as i32 {
            return Err(Error::NestedObjectTooShort);
        }
        // A nested object never extends past its parent. The scope object of a
        // CodeWScope ends exactly where the CodeWScope does.
        let end = obj
            .checked_add(len as usize)
            .filter(|&end| end <= cursor.end)
            .ok_or(Error::SizeLargerThanBuffer)?;

        let element = match kind {
            FrameKind::Scope => None,
            _ => self.curr_elem.map(|start| Element::new(start, end - start)),
        };
        self.curr_frame += 1;
        self.frames.as_mut()[self.curr_frame].open(end, kind, element);
        Ok(Cursor::new(self.data, cursor.pos, end))
    }

    /// A CodeWScope holds its total length, the code string and the scope
    /// object. The outer length gets a frame of its own, checked when the scope
    /// object closes.
    fn push_code_w_scope(&mut self, cursor: Cursor<'a>) -> Check<Cursor<'a>> {
        let mut cursor = self.push_frame(cursor, FrameKind::CodeWScope)?;
        cursor.skip_string()?;
        self.push_frame(cursor, FrameKind::Scope)
    }

    fn maybe_pop_code_w_scope(&mut self, cursor: &Cursor<'a>) -> Check {
        if S::PRECISE && self.current().kind() == FrameKind::Scope {
            self.curr_frame -= 1;
            debug_assert_eq!(self.current().kind(), FrameKind::CodeWScope);
            if cursor.pos != self.current().end() {
                return Err(Error::IncorrectLength);
            }
        }
        Ok(())
    }

    /// Close the current frame and resume its parent, if any.
    fn pop_frame(&mut self, cursor: &mut Cursor<'a>) -> bool {
        if self.curr_frame == 0 {
            return false;
        }
        self.curr_frame -= 1;
        cursor.end = self.current().end();
        true
    }

    /// Describes where a failure occurred, e.g.
    /// `in element with field name 'foo.bar' in object with _id: 1`.
    fn context(&self) -> Option<String> {
        if !S::PRECISE {
            return None;
        }
        let mut ctx = String::from("in element with field name '");
        let frames = self.frames.as_ref();
        for frame in frames.iter().take(self.curr_frame + 1).skip(1) {
            if let Some(elem) = frame.element() {
                element::escape_into(&mut ctx, elem.field_name(self.data));
                ctx.push('.');
            }
        }
        match self.curr_elem {
            Some(start) => element::escape_into(&mut ctx, element::field_name_at(self.data, start)),
            None => ctx.push('?'),
        }
        ctx.push_str("' in object with ");
        match frames.first().and_then(Frame::element) {
            Some(id) => ctx.push_str(&id.render(self.data)),
            None => ctx.push_str("unknown _id"),
        }
        Some(ctx)
    }
}

/// Types whose layout is not covered by the dispatch table.
fn validate_special(cursor: &mut Cursor<'_>, type_byte: u8) -> Check {
    match type_byte {
        element_type::BINARY => {
            // Skip the length and the subtype byte separately so the sum
            // cannot wrap.
            let len = cursor.read_u32()? as usize;
            cursor.skip(len)?;
            cursor.skip(1)?;
        }
        element_type::BOOL => {
            let value = cursor.read_u8()?;
            if value > 1 {
                return Err(Error::InvalidBool(value));
            }
        }
        element_type::REGEX => {
            // Force a bounds check of the position after the field name.
            cursor.skip(0)?;
            cursor.skip(cursor.strlen()? + 1)?; // pattern
            cursor.skip(cursor.strlen()? + 1)?; // options
        }
        element_type::DB_POINTER => {
            cursor.skip_string()?;
            cursor.skip(limits::OBJECT_ID_SIZE)?;
        }
        element_type::MIN_KEY | element_type::MAX_KEY => cursor.skip(0)?,
        other => return Err(Error::UnrecognizedType(other)),
    }
    Ok(())
}

/// Validate with the fast engine only. Errors carry no context.
pub(crate) fn validate_fast(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    FastEngine::new(data, config).validate()
}

/// Validate with the precise engine only.
pub(crate) fn validate_precise(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    PreciseEngine::new(data, config).validate()
}

/// Try the fast engine first; rerun the precise engine on any failure.
///
/// The fast engine fails on CodeWScope and on nesting beyond its fixed frame
/// capacity, so the precise engine both decides those cases and supplies the
/// error context for real failures. A fast success is final.
pub(crate) fn validate_two_tier(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    if validate_fast(data, config).is_ok() {
        return Ok(());
    }
    validate_precise(data, config)
}
