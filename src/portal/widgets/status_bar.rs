/// Dynamic status bar state updated from the active page and mode
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    /// Left side hint text (e.g., "j/k: courses  Space: toggle")
    pub left_hint: String,
    /// Right side hint text (e.g., "Ctrl+h: sidebar")
    pub right_hint: String,
}

impl StatusBarState {
    fn hints(left: &str, right: &str) -> Self {
        Self {
            left_hint: left.to_string(),
            right_hint: right.to_string(),
        }
    }

    pub fn sidebar_normal() -> Self {
        Self::hints("j/k: navigate  1-5: jump", "l/Enter: open  :help")
    }

    pub fn command_mode() -> Self {
        Self::hints("", "Enter: run  Esc: cancel")
    }

    pub fn dashboard() -> Self {
        Self::hints("Training overview", "Ctrl+h: sidebar")
    }

    pub fn course_selection() -> Self {
        Self::hints("j/k: courses  Space: toggle", "Enter: continue  Ctrl+h: sidebar")
    }

    pub fn form_normal() -> Self {
        Self::hints("j/k: fields  i: edit", "b: back  :submit")
    }

    pub fn form_insert() -> Self {
        Self::hints("Type to enter text", "Esc: normal  Tab: next field")
    }

    pub fn confirmation() -> Self {
        Self::hints("Registration confirmed", "Enter: register more courses")
    }

    pub fn courses() -> Self {
        Self::hints("j/k: chapters  n/p: course", "Enter: open  t: mock test")
    }

    pub fn mock_test() -> Self {
        Self::hints("j/k: questions  1-4: answer", "Enter: submit  s: save progress")
    }

    pub fn assessment() -> Self {
        Self::hints("j/k: assessments", "Enter: action  Ctrl+h: sidebar")
    }

    pub fn profile() -> Self {
        Self::hints("Enter: change password", "r: request help")
    }

    pub fn submitting() -> Self {
        Self::hints("Submitting registration...", "")
    }
}
