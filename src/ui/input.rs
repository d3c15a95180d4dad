use eframe::egui;

/// What the controller cares about from one frame of window input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// any plain key press edge, whichever key it was
    Key,
    /// ctrl+s: write the current settings back to disk
    SaveSettings,
    /// window close request
    Quit,
}

/// Collect this frame's input events in arrival order.
pub fn poll_input(ctx: &egui::Context) -> Vec<InputEvent> {
    ctx.input(|i| {
        let mut events: Vec<InputEvent> = i
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key { key, pressed: true, repeat: false, modifiers, .. } => {
                    Some(classify_key(*key, *modifiers))
                }
                _ => None,
            })
            .collect();

        if i.viewport().close_requested() {
            events.push(InputEvent::Quit);
        }
        events
    })
}

fn classify_key(key: egui::Key, modifiers: egui::Modifiers) -> InputEvent {
    if modifiers.command && key == egui::Key::S {
        InputEvent::SaveSettings
    } else {
        InputEvent::Key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_key_is_a_keypress() {
        for key in [egui::Key::Space, egui::Key::A, egui::Key::Enter, egui::Key::S] {
            assert_eq!(classify_key(key, egui::Modifiers::NONE), InputEvent::Key);
        }
    }

    #[test]
    fn test_command_s_saves() {
        assert_eq!(classify_key(egui::Key::S, egui::Modifiers::COMMAND), InputEvent::SaveSettings);
        assert_eq!(classify_key(egui::Key::A, egui::Modifiers::COMMAND), InputEvent::Key);
    }
}
