use zeroize::Zeroize;

/// Single-line editable buffer with a character cursor. Masked buffers hold
/// passwords; their contents are zeroized on clear and drop.
#[derive(Default, Clone)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
    masked: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            masked: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Rendered content: masked buffers show one `mask_char` per character.
    pub fn display(&self, mask_char: char) -> String {
        if self.masked {
            mask_char.to_string().repeat(self.len())
        } else {
            self.content.clone()
        }
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = self.cursor_byte_position();
        self.content.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.remove_char_at_cursor();
            true
        } else {
            false
        }
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor < self.len() {
            self.remove_char_at_cursor();
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.content.zeroize();
        self.content.clear();
        self.cursor = 0;
    }

    fn remove_char_at_cursor(&mut self) {
        let byte_pos = self.cursor_byte_position();
        let next_byte_pos = self.content[byte_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| byte_pos + i)
            .unwrap_or(self.content.len());
        self.content.drain(byte_pos..next_byte_pos);
    }

    fn cursor_byte_position(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Drop for InputBuffer {
    fn drop(&mut self) {
        if self.masked {
            self.content.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_at_cursor() {
        let mut buffer = InputBuffer::new();
        for c in "name".chars() {
            buffer.insert(c);
        }
        buffer.move_start();
        buffer.delete_forward();
        assert_eq!(buffer.content(), "ame");

        buffer.move_end();
        buffer.delete_back();
        assert_eq!(buffer.content(), "am");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut buffer = InputBuffer::new();
        for c in "Zoë".chars() {
            buffer.insert(c);
        }
        assert_eq!(buffer.len(), 3);
        buffer.delete_back();
        assert_eq!(buffer.content(), "Zo");
    }

    #[test]
    fn masked_display_hides_content() {
        let mut buffer = InputBuffer::masked();
        for c in "secret".chars() {
            buffer.insert(c);
        }
        assert_eq!(buffer.display('*'), "******");
        assert_eq!(buffer.content(), "secret");
    }
}
