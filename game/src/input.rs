use winit::event::VirtualKeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// The four arrow keys. Nothing else drives the active piece.
pub fn map_key_to_action(key: VirtualKeyCode) -> Option<InputAction> {
    match key {
        VirtualKeyCode::Left => Some(InputAction::MoveLeft),
        VirtualKeyCode::Right => Some(InputAction::MoveRight),
        VirtualKeyCode::Down => Some(InputAction::SoftDrop),
        VirtualKeyCode::Up => Some(InputAction::Rotate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_arrow_keys_map_to_actions() {
        assert_eq!(
            map_key_to_action(VirtualKeyCode::Left),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(
            map_key_to_action(VirtualKeyCode::Right),
            Some(InputAction::MoveRight)
        );
        assert_eq!(
            map_key_to_action(VirtualKeyCode::Down),
            Some(InputAction::SoftDrop)
        );
        assert_eq!(map_key_to_action(VirtualKeyCode::Up), Some(InputAction::Rotate));
        for key in [
            VirtualKeyCode::Space,
            VirtualKeyCode::C,
            VirtualKeyCode::Escape,
            VirtualKeyCode::W,
        ] {
            assert_eq!(map_key_to_action(key), None);
        }
    }
}
