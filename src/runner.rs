use crate::{
    chip8::ChipSet,
    devices::{DisplayCommands, KeyboardCommands},
    opcode::Operation,
    ProcessError,
};

/// Runs a single interpreter frame against the external collaborators.
///
/// The keypad state is copied in before the cycle and the framebuffer is
/// pushed out afterwards whenever the cycle produced a redraw. The calling
/// cadence is left entirely to the host.
pub fn frame<D, K>(
    chip: &mut ChipSet,
    display: &mut D,
    keyboard: &K,
) -> Result<Operation, ProcessError>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    chip.set_keys(&keyboard.keys());

    let operation = chip.cycle()?;

    if matches!(operation, Operation::Draw) {
        display.display(chip.framebuffer());
    }

    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        definitions::keyboard,
        devices::{MockDisplayCommands, MockKeyboardCommands},
        resources::Rom,
    };

    fn setup_chip(program: &[u8]) -> ChipSet {
        let rom = Rom::new("runner test", program).unwrap();
        ChipSet::new(rom)
    }

    #[test]
    fn test_frame_pushes_framebuffer_on_draw() {
        // 00E0 - clear screen, reports a redraw
        let mut chip = setup_chip(&[0x00, 0xE0]);

        let mut display = MockDisplayCommands::new();
        display
            .expect_display()
            .times(1)
            .withf(|pixels: &[u8]| pixels.iter().all(|&pixel| pixel == 0))
            .return_const(());

        let mut keyboard = MockKeyboardCommands::new();
        keyboard
            .expect_keys()
            .times(1)
            .return_const([false; keyboard::SIZE]);

        assert_eq!(Ok(Operation::Draw), frame(&mut chip, &mut display, &keyboard));
    }

    #[test]
    fn test_frame_skips_push_without_draw() {
        // 6005 - plain register assign, no redraw
        let mut chip = setup_chip(&[0x60, 0x05]);

        let mut display = MockDisplayCommands::new();
        display.expect_display().times(0);

        let mut keyboard = MockKeyboardCommands::new();
        keyboard
            .expect_keys()
            .times(1)
            .return_const([false; keyboard::SIZE]);

        assert_eq!(Ok(Operation::None), frame(&mut chip, &mut display, &keyboard));
    }

    #[test]
    fn test_frame_copies_keys_into_the_chip() {
        // EX9E with V0 = 0 - skips when key 0 is pressed
        let mut chip = setup_chip(&[0xE0, 0x9E]);

        let mut display = MockDisplayCommands::new();
        display.expect_display().times(0);

        let mut keys = [false; keyboard::SIZE];
        keys[0] = true;

        let mut keyboard = MockKeyboardCommands::new();
        keyboard.expect_keys().times(1).return_const(keys);

        assert_eq!(Ok(Operation::None), frame(&mut chip, &mut display, &keyboard));
        assert!(chip.keys()[0]);
    }
}
