use crate::definitions::keyboard;

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the display based code
pub trait DisplayCommands {
    /// Will present the given framebuffer, one `0`/`1` byte per pixel,
    /// row-major with 64 pixels per row
    fn display(&mut self, pixels: &[u8]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keypad state of the host
pub trait KeyboardCommands {
    /// The current state of the sixteen logical keys
    fn keys(&self) -> [bool; keyboard::SIZE];
}

/// The sixteen hex keypad flags `0x0-0xF`.
///
/// Mutated only by external key press / release notifications, read by the
/// skip-if-key and wait-for-key instructions. The mapping from physical
/// input devices onto these flags is entirely the caller's concern.
#[derive(Default, Debug, Clone)]
pub struct Keypad {
    keys: [bool; keyboard::SIZE],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    /// Will set the value of the given key, out of range keys are
    /// tolerated as a no-op
    pub fn set_key(&mut self, key: usize, to: bool) {
        if let Some(entry) = self.keys.get_mut(key) {
            *entry = to;
        }
    }

    /// Will overwrite all sixteen flags at once
    pub fn set_keys(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keys = *keys;
    }

    /// Out of range keys read as released
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// The lowest-numbered pressed key, if any
    pub fn first_pressed(&self) -> Option<usize> {
        self.keys.iter().position(|&key| key)
    }

    pub fn keys(&self) -> &[bool] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_key() {
        let mut keypad = Keypad::new();
        keypad.set_key(0xE, true);
        assert!(keypad.is_pressed(0xE));

        keypad.set_key(0xE, false);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_out_of_range_key_is_a_noop() {
        let mut keypad = Keypad::new();
        keypad.set_key(keyboard::SIZE, true);
        keypad.set_key(0xFFFF, true);

        assert!(keypad.keys().iter().all(|&key| !key));
        assert!(!keypad.is_pressed(0xFFFF));
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::new();
        assert_eq!(None, keypad.first_pressed());

        keypad.set_key(0xB, true);
        keypad.set_key(0x3, true);
        assert_eq!(Some(0x3), keypad.first_pressed());
    }
}
