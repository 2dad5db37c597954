use crate::scene::context::{Command, ShadeMode};
use egui::Key;

/// Key bindings, checked in order every frame.
pub const KEY_BINDINGS: &[(Key, Command)] = &[
    (Key::Escape, Command::Quit),
    (Key::A, Command::OrbitLeft),
    (Key::D, Command::OrbitRight),
    (Key::W, Command::CameraUp),
    (Key::S, Command::CameraDown),
    (Key::Q, Command::ZoomOut),
    (Key::E, Command::ZoomIn),
    (Key::P, Command::ToggleProjection),
    (Key::Num1, Command::SetShading(ShadeMode::Flat)),
    (Key::Num2, Command::SetShading(ShadeMode::Gouraud)),
    (Key::Num3, Command::SetShading(ShadeMode::Phong)),
    (Key::M, Command::NextMaterial),
    (Key::L, Command::ToggleAutoRotate),
    (Key::R, Command::Reset),
    (Key::Z, Command::LightAngleDown),
    (Key::X, Command::LightAngleUp),
    (Key::C, Command::LightRadiusDown),
    (Key::V, Command::LightRadiusUp),
    (Key::B, Command::LightHeightDown),
    (Key::N, Command::LightHeightUp),
    (Key::H, Command::ToggleSpecularModel),
];

/// Commands for the keys pressed this frame. egui reports letter keys
/// regardless of shift, so bindings are case-insensitive.
pub fn pressed_commands(input: &egui::InputState) -> Vec<Command> {
    KEY_BINDINGS
        .iter()
        .filter(|(key, _)| input.key_pressed(*key))
        .map(|&(_, command)| command)
        .collect()
}

/// Same bindings keyed by character, for scripted key sequences (`--keys`).
/// `\u{1b}` stands for Escape.
pub fn command_for_char(c: char) -> Option<Command> {
    let key = match c {
        '\u{1b}' => Key::Escape,
        '1' => Key::Num1,
        '2' => Key::Num2,
        '3' => Key::Num3,
        c => Key::from_name(&c.to_ascii_uppercase().to_string())?,
    };
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, command)| command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_case_insensitively() {
        assert_eq!(command_for_char('a'), Some(Command::OrbitLeft));
        assert_eq!(command_for_char('A'), Some(Command::OrbitLeft));
        assert_eq!(command_for_char('q'), Some(Command::ZoomOut));
        assert_eq!(command_for_char('h'), Some(Command::ToggleSpecularModel));
    }

    #[test]
    fn digits_select_shading() {
        assert_eq!(
            command_for_char('1'),
            Some(Command::SetShading(ShadeMode::Flat))
        );
        assert_eq!(
            command_for_char('2'),
            Some(Command::SetShading(ShadeMode::Gouraud))
        );
        assert_eq!(
            command_for_char('3'),
            Some(Command::SetShading(ShadeMode::Phong))
        );
    }

    #[test]
    fn escape_quits_and_unbound_keys_are_ignored() {
        assert_eq!(command_for_char('\u{1b}'), Some(Command::Quit));
        assert_eq!(command_for_char('g'), None);
        assert_eq!(command_for_char('4'), None);
        assert_eq!(command_for_char(' '), None);
    }

    #[test]
    fn every_key_is_bound_once() {
        for (i, (key, _)) in KEY_BINDINGS.iter().enumerate() {
            assert!(
                KEY_BINDINGS[i + 1..].iter().all(|(k, _)| k != key),
                "{key:?} bound twice"
            );
        }
    }
}
