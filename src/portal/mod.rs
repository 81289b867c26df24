pub mod ui;
mod widgets;

pub use widgets::StatusBarState;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::core::aggregate::{count_by, percent_average};
use crate::core::status::StatusRegistry;
use crate::core::wizard::{Wizard, WizardError, WizardStep};
use crate::registrar::{
    ApplicantDetails, RegistrationMessage, RegistrationRequest, Registrar, SimulatedRegistrar,
};
use crate::ui::Theme;
use crate::vim::{parse_command, Command, InputBuffer, VimMode};

/// Pages reachable from the sidebar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Training,
    Courses,
    Assessment,
    Profile,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Training,
        Page::Courses,
        Page::Assessment,
        Page::Profile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Training => "Training Form",
            Page::Courses => "Courses & Tests",
            Page::Assessment => "Assessment",
            Page::Profile => "Profile",
        }
    }
}

/// Which panel is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Sidebar,
    Content,
}

/// What is currently focused inside the content panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFocus {
    /// A navigable list (catalog, chapters, assessments)
    List,
    /// An input field by index within the active form
    InputField(usize),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown in the message panel; the portal's toast sink.
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

/// Practice-test session state for the Courses page.
pub struct MockTest {
    pub course_name: String,
    pub topic: String,
    pub answers: Vec<Option<usize>>,
    pub cursor: usize,
}

pub const MOCK_TEST_QUESTIONS: usize = 5;
pub const MOCK_TEST_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

impl MockTest {
    pub fn new(course_name: &str) -> Self {
        let topic = course_name
            .split(" - ")
            .nth(1)
            .unwrap_or(course_name)
            .to_string();
        Self {
            course_name: course_name.to_string(),
            topic,
            answers: vec![None; MOCK_TEST_QUESTIONS],
            cursor: 0,
        }
    }

    pub fn answered(&self) -> usize {
        count_by(&self.answers, |a| a.is_some())
    }
}

const APPLICANT_FIELDS: usize = 5;
const PASSWORD_FIELDS: usize = 3;
const MIN_PASSWORD_LENGTH: usize = 8;

/// Main portal application state
pub struct PortalApp {
    pub config: PortalConfig,
    pub theme: Theme,
    pub registry: StatusRegistry,

    // Vim mode state
    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,

    // Panel navigation
    pub panel_focus: PanelFocus,
    pub content_focus: ContentFocus,
    pub selected_page: usize,

    // Registration wizard
    pub wizard: Wizard,
    pub catalog_cursor: usize,
    pub full_name: InputBuffer,
    pub email: InputBuffer,
    pub phone: InputBuffer,
    pub education: InputBuffer,
    pub experience: InputBuffer,
    pub last_registration_id: Option<String>,

    // Courses page
    pub course_cursor: usize,
    pub chapter_cursor: usize,
    pub mock_test: Option<MockTest>,

    // Assessment page
    pub assessment_cursor: usize,

    // Profile page
    pub changing_password: bool,
    pub current_password: InputBuffer,
    pub new_password: InputBuffer,
    pub confirm_password: InputBuffer,

    // UI state
    pub message: Option<Notice>,
    pub show_help: bool,
    pub confirm_quit: bool,
    pub should_exit: bool,
    spinner_frame: usize,
    pub status_bar: StatusBarState,

    // Submission plumbing
    registrar: Box<dyn Registrar>,
    submission_rx: Option<mpsc::UnboundedReceiver<RegistrationMessage>>,
}

impl PortalApp {
    pub fn new(config: PortalConfig) -> Self {
        let delay = Duration::from_millis(config.registration.submit_delay_ms);
        Self::with_registrar(config, Box::new(SimulatedRegistrar::accepting(delay)))
    }

    pub fn with_registrar(config: PortalConfig, registrar: Box<dyn Registrar>) -> Self {
        Self {
            config,
            theme: Theme::default(),
            registry: StatusRegistry::with_defaults(),
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            panel_focus: PanelFocus::Sidebar,
            content_focus: ContentFocus::None,
            selected_page: 0,
            wizard: Wizard::new(),
            catalog_cursor: 0,
            full_name: InputBuffer::new(),
            email: InputBuffer::new(),
            phone: InputBuffer::new(),
            education: InputBuffer::new(),
            experience: InputBuffer::new(),
            last_registration_id: None,
            course_cursor: 0,
            chapter_cursor: 0,
            mock_test: None,
            assessment_cursor: 0,
            changing_password: false,
            current_password: InputBuffer::masked(),
            new_password: InputBuffer::masked(),
            confirm_password: InputBuffer::masked(),
            message: None,
            show_help: false,
            confirm_quit: false,
            should_exit: false,
            spinner_frame: 0,
            status_bar: StatusBarState::sidebar_normal(),
            registrar,
            submission_rx: None,
        }
    }

    pub fn page(&self) -> Page {
        Page::ALL[self.selected_page]
    }

    pub fn is_submitting(&self) -> bool {
        self.wizard.is_submitting()
    }

    /// Average of all recorded assessment scores, if any exist.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .config
            .assessments
            .iter()
            .flat_map(|a| [a.theory_score, a.practical_score])
            .flatten()
            .map(f64::from)
            .collect();
        percent_average(&scores, |s| *s).ok()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear the current notice on any key, unless a submission is running
        if self.message.is_some() && !self.is_submitting() {
            self.message = None;
        }

        if self.confirm_quit {
            self.handle_confirm_key(key);
            self.update_status_bar();
            return;
        }

        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::Char('q') {
                self.show_help = false;
            }
            self.update_status_bar();
            return;
        }

        match self.vim_mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Insert => self.handle_insert_mode(key),
            VimMode::Command => self.handle_command_mode(key),
        }

        self.update_status_bar();
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('h') => {
                    self.focus_sidebar();
                    return;
                }
                KeyCode::Char('l') => {
                    self.focus_content();
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.enter_command();
                self.command_buffer.clear();
            }

            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.navigate_down();
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.navigate_up();
            }

            KeyCode::Char('i') | KeyCode::Char('a') => {
                if self.panel_focus == PanelFocus::Content
                    && matches!(self.content_focus, ContentFocus::InputField(_))
                {
                    self.vim_mode = self.vim_mode.enter_insert();
                }
            }

            KeyCode::Enter => {
                self.handle_enter();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.panel_focus == PanelFocus::Sidebar {
                    self.focus_content();
                } else {
                    self.handle_enter();
                }
            }

            KeyCode::Char('h') | KeyCode::Left => {
                if self.panel_focus == PanelFocus::Content {
                    self.focus_sidebar();
                }
            }
            KeyCode::Esc => {
                self.handle_escape();
            }

            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
            }

            // Quick page select
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.handle_digit(c);
            }

            // Toggle a course on the wizard's selection screen
            KeyCode::Char(' ') => {
                if self.panel_focus == PanelFocus::Content {
                    self.handle_space();
                }
            }

            // Page-local shortcuts
            KeyCode::Char('b') => {
                if self.page() == Page::Training && self.wizard.step() == WizardStep::Form {
                    self.wizard_back();
                }
            }
            KeyCode::Char('n') => {
                if self.page() == Page::Courses && self.mock_test.is_none() {
                    self.next_course();
                }
            }
            KeyCode::Char('p') => {
                if self.page() == Page::Courses && self.mock_test.is_none() {
                    self.prev_course();
                }
            }
            KeyCode::Char('t') => {
                if self.page() == Page::Courses && self.mock_test.is_none() {
                    self.start_mock_test();
                }
            }
            KeyCode::Char('s') => {
                if self.page() == Page::Courses && self.mock_test.is_some() {
                    self.save_mock_test();
                }
            }
            KeyCode::Char('r') => {
                if self.page() == Page::Profile && !self.changing_password {
                    self.notify(
                        NoticeKind::Success,
                        "Help request submitted! Our team will contact you shortly.".to_string(),
                    );
                }
            }

            _ => {}
        }
    }

    fn handle_insert_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.escape();
            }
            KeyCode::Enter => {
                if let ContentFocus::InputField(field) = self.content_focus {
                    let last = self.form_field_count().saturating_sub(1);
                    if field < last {
                        self.content_focus = ContentFocus::InputField(field + 1);
                    } else {
                        self.vim_mode = VimMode::Normal;
                        self.submit_active_form();
                    }
                } else {
                    self.vim_mode = VimMode::Normal;
                }
            }
            KeyCode::Tab => {
                if let ContentFocus::InputField(field) = self.content_focus {
                    if field + 1 < self.form_field_count() {
                        self.content_focus = ContentFocus::InputField(field + 1);
                    }
                }
            }
            KeyCode::BackTab => {
                if let ContentFocus::InputField(field) = self.content_focus {
                    if field > 0 {
                        self.content_focus = ContentFocus::InputField(field - 1);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.current_input_buffer() {
                    buffer.delete_back();
                }
            }
            KeyCode::Delete => {
                if let Some(buffer) = self.current_input_buffer() {
                    buffer.delete_forward();
                }
            }
            KeyCode::Left => {
                if let Some(buffer) = self.current_input_buffer() {
                    buffer.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(buffer) = self.current_input_buffer() {
                    buffer.move_right();
                }
            }
            KeyCode::Home => {
                if let Some(buffer) = self.current_input_buffer() {
                    buffer.move_start();
                }
            }
            KeyCode::End => {
                if let Some(buffer) = self.current_input_buffer() {
                    buffer.move_end();
                }
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'u' => {
                            if let Some(buffer) = self.current_input_buffer() {
                                buffer.clear();
                            }
                        }
                        'a' => {
                            if let Some(buffer) = self.current_input_buffer() {
                                buffer.move_start();
                            }
                        }
                        'e' => {
                            if let Some(buffer) = self.current_input_buffer() {
                                buffer.move_end();
                            }
                        }
                        'h' => {
                            self.vim_mode = VimMode::Normal;
                            self.focus_sidebar();
                        }
                        _ => {}
                    }
                } else if let Some(buffer) = self.current_input_buffer() {
                    buffer.insert(c);
                }
            }
            _ => {}
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.escape();
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let input = self.command_buffer.content().to_string();
                self.vim_mode = self.vim_mode.escape();
                self.command_buffer.clear();
                match parse_command(&input) {
                    Ok(command) => self.execute_command(command),
                    Err(e) => self.notify(NoticeKind::Error, e.to_string()),
                }
            }
            KeyCode::Backspace => {
                if self.command_buffer.is_empty() {
                    self.vim_mode = self.vim_mode.escape();
                } else {
                    self.command_buffer.delete_back();
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.insert(c);
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.confirm_quit = false;
                self.should_exit = true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_quit = false;
            }
            _ => {}
        }
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::Dashboard => self.set_page(Page::Dashboard),
            Command::Training => self.set_page(Page::Training),
            Command::Courses => self.set_page(Page::Courses),
            Command::Assessment => self.set_page(Page::Assessment),
            Command::Profile => self.set_page(Page::Profile),
            Command::Next => {
                if self.page() == Page::Training {
                    self.wizard_advance();
                } else {
                    self.notify(NoticeKind::Error, "No registration in progress".to_string());
                }
            }
            Command::Back => {
                if self.page() == Page::Training {
                    self.wizard_back();
                }
            }
            Command::Submit => {
                if self.page() == Page::Training {
                    self.begin_submission();
                }
            }
            Command::Restart => {
                if self.page() == Page::Training {
                    self.wizard_restart();
                }
            }
            Command::Help => self.show_help = true,
            Command::Quit => self.confirm_quit = true,
        }
    }

    fn handle_escape(&mut self) {
        if self.panel_focus != PanelFocus::Content {
            return;
        }
        if self.changing_password {
            self.close_password_form();
            return;
        }
        if self.page() == Page::Courses && self.mock_test.is_some() {
            self.save_mock_test();
            return;
        }
        self.focus_sidebar();
    }

    fn handle_digit(&mut self, c: char) {
        let num = c.to_digit(10).unwrap_or(0) as usize;

        // Inside a mock test digits answer the current question
        if self.panel_focus == PanelFocus::Content && self.page() == Page::Courses {
            if let Some(test) = &mut self.mock_test {
                if (1..=MOCK_TEST_OPTIONS.len()).contains(&num) {
                    test.answers[test.cursor] = Some(num - 1);
                }
                return;
            }
        }

        if self.panel_focus == PanelFocus::Sidebar && num > 0 && num <= Page::ALL.len() {
            self.set_page(Page::ALL[num - 1]);
        }
    }

    fn handle_space(&mut self) {
        if self.page() != Page::Training || self.wizard.step() != WizardStep::Selection {
            return;
        }
        let id = match self.config.catalog.get(self.catalog_cursor) {
            Some(course) => course.id.clone(),
            None => return,
        };
        if let Err(e) = self.wizard.toggle_course(&id) {
            warn!("selection toggle rejected: {e}");
        }
    }

    fn focus_sidebar(&mut self) {
        self.panel_focus = PanelFocus::Sidebar;
        self.content_focus = ContentFocus::None;
    }

    fn focus_content(&mut self) {
        self.panel_focus = PanelFocus::Content;
        self.content_focus = self.default_content_focus();
    }

    fn default_content_focus(&self) -> ContentFocus {
        match self.page() {
            Page::Training => match self.wizard.step() {
                WizardStep::Selection => ContentFocus::List,
                WizardStep::Form => ContentFocus::InputField(0),
                WizardStep::Confirmation => ContentFocus::None,
            },
            Page::Courses | Page::Assessment => ContentFocus::List,
            Page::Profile if self.changing_password => ContentFocus::InputField(0),
            Page::Dashboard | Page::Profile => ContentFocus::None,
        }
    }

    fn navigate_down(&mut self) {
        match self.panel_focus {
            PanelFocus::Sidebar => {
                if self.selected_page < Page::ALL.len() - 1 {
                    self.switch_page(self.selected_page + 1);
                }
            }
            PanelFocus::Content => self.navigate_content(1),
        }
    }

    fn navigate_up(&mut self) {
        match self.panel_focus {
            PanelFocus::Sidebar => {
                if self.selected_page > 0 {
                    self.switch_page(self.selected_page - 1);
                }
            }
            PanelFocus::Content => self.navigate_content(-1),
        }
    }

    fn navigate_content(&mut self, delta: isize) {
        match self.content_focus {
            ContentFocus::InputField(field) => {
                let count = self.form_field_count();
                let next = field.saturating_add_signed(delta);
                if next < count {
                    self.content_focus = ContentFocus::InputField(next);
                }
            }
            ContentFocus::List => match self.page() {
                Page::Training => {
                    self.catalog_cursor = step_cursor(
                        self.catalog_cursor,
                        delta,
                        self.config.catalog.len(),
                    );
                }
                Page::Courses => {
                    if let Some(test) = &mut self.mock_test {
                        test.cursor = step_cursor(test.cursor, delta, MOCK_TEST_QUESTIONS);
                    } else {
                        let chapters = self
                            .config
                            .enrollments
                            .get(self.course_cursor)
                            .map(|e| e.chapters.len())
                            .unwrap_or(0);
                        self.chapter_cursor = step_cursor(self.chapter_cursor, delta, chapters);
                    }
                }
                Page::Assessment => {
                    self.assessment_cursor = step_cursor(
                        self.assessment_cursor,
                        delta,
                        self.config.assessments.len(),
                    );
                }
                _ => {}
            },
            ContentFocus::None => {}
        }
    }

    fn handle_enter(&mut self) {
        match self.panel_focus {
            PanelFocus::Sidebar => {
                self.focus_content();
                if matches!(self.content_focus, ContentFocus::InputField(_)) {
                    self.vim_mode = VimMode::Insert;
                }
            }
            PanelFocus::Content => match self.page() {
                Page::Dashboard => {}
                Page::Training => self.handle_training_enter(),
                Page::Courses => self.handle_courses_enter(),
                Page::Assessment => self.handle_assessment_enter(),
                Page::Profile => self.handle_profile_enter(),
            },
        }
    }

    fn handle_training_enter(&mut self) {
        match self.wizard.step() {
            WizardStep::Selection => self.wizard_advance(),
            WizardStep::Form => {
                // Enter on a field edits it; submission happens from the last
                // field in insert mode, or via :submit
                if matches!(self.content_focus, ContentFocus::InputField(_)) {
                    self.vim_mode = VimMode::Insert;
                }
            }
            WizardStep::Confirmation => self.wizard_restart(),
        }
    }

    fn handle_courses_enter(&mut self) {
        if self.mock_test.is_some() {
            self.submit_mock_test();
            return;
        }

        let Some(enrollment) = self.config.enrollments.get(self.course_cursor) else {
            return;
        };
        let Some(chapter) = enrollment.chapters.get(self.chapter_cursor) else {
            return;
        };
        let text = if chapter.completed {
            format!("Reviewing chapter: {}", chapter.title)
        } else {
            format!("Starting chapter: {}", chapter.title)
        };
        self.notify(NoticeKind::Success, text);
    }

    fn handle_assessment_enter(&mut self) {
        let Some(assessment) = self.config.assessments.get(self.assessment_cursor) else {
            return;
        };
        let course_name = assessment.course_name.clone();
        let descriptor = self.registry.resolve(&assessment.status);

        use crate::core::status::ActionKind;
        match descriptor.primary_action() {
            Some(ActionKind::StartAssessment) | Some(ActionKind::ContinueAssessment) => {
                self.notify(
                    NoticeKind::Success,
                    "Assessment started! Redirecting to test interface...".to_string(),
                );
            }
            Some(ActionKind::DownloadCertificate) => {
                let text = format!("Certificate for {course_name} downloaded successfully!");
                self.notify(NoticeKind::Success, text);
            }
            None => {}
        }
    }

    fn handle_profile_enter(&mut self) {
        if self.changing_password {
            if matches!(self.content_focus, ContentFocus::InputField(_)) {
                self.vim_mode = VimMode::Insert;
            }
            return;
        }
        self.changing_password = true;
        self.content_focus = ContentFocus::InputField(0);
        self.vim_mode = VimMode::Insert;
    }

    /// Number of fields in the form the content focus is cycling through.
    fn form_field_count(&self) -> usize {
        match self.page() {
            Page::Training if self.wizard.step() == WizardStep::Form => APPLICANT_FIELDS,
            Page::Profile if self.changing_password => PASSWORD_FIELDS,
            _ => 0,
        }
    }

    fn current_input_buffer(&mut self) -> Option<&mut InputBuffer> {
        let ContentFocus::InputField(idx) = self.content_focus else {
            return None;
        };
        match self.page() {
            Page::Training if self.wizard.step() == WizardStep::Form => match idx {
                0 => Some(&mut self.full_name),
                1 => Some(&mut self.email),
                2 => Some(&mut self.phone),
                3 => Some(&mut self.education),
                4 => Some(&mut self.experience),
                _ => None,
            },
            Page::Profile if self.changing_password => match idx {
                0 => Some(&mut self.current_password),
                1 => Some(&mut self.new_password),
                2 => Some(&mut self.confirm_password),
                _ => None,
            },
            _ => None,
        }
    }

    /// Submit whichever form the insert-mode Enter landed on.
    fn submit_active_form(&mut self) {
        match self.page() {
            Page::Training => self.begin_submission(),
            Page::Profile => self.submit_password_change(),
            _ => {}
        }
    }

    // --- Wizard plumbing -------------------------------------------------

    fn wizard_advance(&mut self) {
        match self.wizard.advance() {
            Ok(()) => {
                self.content_focus = ContentFocus::InputField(0);
            }
            Err(WizardError::EmptySelection) => {
                self.notify(
                    NoticeKind::Error,
                    "Please select at least one course".to_string(),
                );
            }
            Err(e) => self.report_wizard_error(e),
        }
    }

    fn wizard_back(&mut self) {
        match self.wizard.back() {
            Ok(()) => {
                self.content_focus = ContentFocus::List;
            }
            Err(e) => self.report_wizard_error(e),
        }
    }

    fn wizard_restart(&mut self) {
        match self.wizard.restart() {
            Ok(()) => {
                self.catalog_cursor = 0;
                self.last_registration_id = None;
                self.clear_applicant_form();
                self.content_focus = ContentFocus::List;
            }
            Err(e) => self.report_wizard_error(e),
        }
    }

    fn report_wizard_error(&mut self, error: WizardError) {
        warn!("wizard transition rejected: {error}");
        self.notify(NoticeKind::Error, error.to_string());
    }

    fn clear_applicant_form(&mut self) {
        self.full_name.clear();
        self.email.clear();
        self.phone.clear();
        self.education.clear();
        self.experience.clear();
    }

    fn validate_applicant_form(&mut self) -> bool {
        if self.full_name.content().trim().is_empty() {
            self.notify(NoticeKind::Error, "Full name is required".to_string());
            return false;
        }
        let email = self.email.content();
        if email.trim().is_empty() || !email.contains('@') {
            self.notify(
                NoticeKind::Error,
                "A valid email address is required".to_string(),
            );
            return false;
        }
        if self.phone.content().trim().is_empty() {
            self.notify(NoticeKind::Error, "Phone number is required".to_string());
            return false;
        }
        true
    }

    /// Start the asynchronous submission. A second call while one is in
    /// flight is a no-op.
    pub fn begin_submission(&mut self) {
        if self.wizard.step() != WizardStep::Form {
            self.report_wizard_error(WizardError::InvalidTransition {
                step: self.wizard.step(),
                action: crate::core::wizard::WizardAction::Submit,
            });
            return;
        }
        if !self.validate_applicant_form() {
            return;
        }

        let token = match self.wizard.begin_submit() {
            Ok(Some(token)) => token,
            Ok(None) => return, // already in flight
            Err(e) => {
                self.report_wizard_error(e);
                return;
            }
        };

        let request = RegistrationRequest {
            course_ids: self.wizard.selection().iter().map(str::to_string).collect(),
            applicant: ApplicantDetails {
                full_name: self.full_name.content().to_string(),
                email: self.email.content().to_string(),
                phone: self.phone.content().to_string(),
                education: self.education.content().to_string(),
                experience: self.experience.content().to_string(),
            },
            token,
        };
        self.submission_rx = Some(self.registrar.submit(request));
    }

    /// Drain any resolved submission outcome; called on every tick.
    pub fn poll_submission(&mut self) {
        let Some(rx) = &mut self.submission_rx else {
            return;
        };
        let Ok(message) = rx.try_recv() else {
            return;
        };
        self.submission_rx = None;

        match message {
            RegistrationMessage::Submitted {
                registration_id,
                token,
            } => {
                if self.wizard.complete_submit(token) {
                    self.last_registration_id = Some(registration_id);
                    self.content_focus = ContentFocus::None;
                    self.notify(
                        NoticeKind::Success,
                        "Training registration submitted successfully!".to_string(),
                    );
                } else {
                    info!("discarding stale submission result {registration_id}");
                }
            }
            RegistrationMessage::Failed { reason, token } => {
                if self.wizard.fail_submit(token) {
                    let error = WizardError::SubmissionFailed(reason);
                    self.notify(NoticeKind::Error, error.to_string());
                }
            }
        }
    }

    // --- Page handling ---------------------------------------------------

    pub fn set_page(&mut self, page: Page) {
        let idx = Page::ALL.iter().position(|p| *p == page).unwrap_or(0);
        self.switch_page(idx);
    }

    fn switch_page(&mut self, idx: usize) {
        if idx == self.selected_page {
            return;
        }
        // Leaving the wizard mid-submission abandons it: a late result must
        // not flip the step under the user
        if self.page() == Page::Training && self.is_submitting() {
            info!("registration abandoned mid-submission, cancelling");
            self.wizard.cancel_submission();
            self.submission_rx = None;
        }
        self.selected_page = idx;
        self.content_focus = if self.panel_focus == PanelFocus::Content {
            self.default_content_focus()
        } else {
            ContentFocus::None
        };
    }

    fn next_course(&mut self) {
        if !self.config.enrollments.is_empty() {
            self.course_cursor = (self.course_cursor + 1) % self.config.enrollments.len();
            self.chapter_cursor = 0;
        }
    }

    fn prev_course(&mut self) {
        let len = self.config.enrollments.len();
        if len > 0 {
            self.course_cursor = (self.course_cursor + len - 1) % len;
            self.chapter_cursor = 0;
        }
    }

    fn start_mock_test(&mut self) {
        let Some(enrollment) = self.config.enrollments.get(self.course_cursor) else {
            return;
        };
        if !enrollment.mock_test_available {
            self.notify(
                NoticeKind::Error,
                "Complete all chapters to unlock the mock test".to_string(),
            );
            return;
        }
        self.mock_test = Some(MockTest::new(&enrollment.name));
        self.content_focus = ContentFocus::List;
        self.notify(NoticeKind::Success, "Mock test started! Good luck!".to_string());
    }

    fn save_mock_test(&mut self) {
        if self.mock_test.take().is_some() {
            self.notify(NoticeKind::Success, "Mock test progress saved".to_string());
        }
    }

    fn submit_mock_test(&mut self) {
        if self.mock_test.take().is_some() {
            self.notify(
                NoticeKind::Success,
                "Mock test completed! Check the results.".to_string(),
            );
        }
    }

    fn close_password_form(&mut self) {
        self.changing_password = false;
        self.current_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
        self.content_focus = ContentFocus::None;
        self.vim_mode = VimMode::Normal;
    }

    fn submit_password_change(&mut self) {
        if self.current_password.is_empty() {
            self.notify(NoticeKind::Error, "Current password is required".to_string());
            return;
        }
        if self.new_password.len() < MIN_PASSWORD_LENGTH {
            self.notify(
                NoticeKind::Error,
                format!("New password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
            return;
        }
        if self.new_password.content() != self.confirm_password.content() {
            self.notify(NoticeKind::Error, "Passwords do not match".to_string());
            return;
        }
        self.close_password_form();
        self.notify(NoticeKind::Success, "Password changed successfully!".to_string());
    }

    // --- Notices & ticking -----------------------------------------------

    /// Fire-and-forget notification sink backing the message panel.
    pub fn notify(&mut self, kind: NoticeKind, text: String) {
        self.message = Some(Notice { text, kind });
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 4;
        self.poll_submission();
        self.update_status_bar();
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        SPINNER[self.spinner_frame]
    }

    /// Update status bar hints from the current application state
    pub fn update_status_bar(&mut self) {
        if self.is_submitting() {
            self.status_bar = StatusBarState::submitting();
            return;
        }
        if self.vim_mode == VimMode::Command {
            self.status_bar = StatusBarState::command_mode();
            return;
        }

        self.status_bar = match self.panel_focus {
            PanelFocus::Sidebar => StatusBarState::sidebar_normal(),
            PanelFocus::Content => self.content_status_bar(),
        };
    }

    fn content_status_bar(&self) -> StatusBarState {
        let is_insert = self.vim_mode == VimMode::Insert;

        match self.page() {
            Page::Dashboard => StatusBarState::dashboard(),
            Page::Training => match self.wizard.step() {
                WizardStep::Selection => StatusBarState::course_selection(),
                WizardStep::Form => {
                    if is_insert {
                        StatusBarState::form_insert()
                    } else {
                        StatusBarState::form_normal()
                    }
                }
                WizardStep::Confirmation => StatusBarState::confirmation(),
            },
            Page::Courses => {
                if self.mock_test.is_some() {
                    StatusBarState::mock_test()
                } else {
                    StatusBarState::courses()
                }
            }
            Page::Assessment => StatusBarState::assessment(),
            Page::Profile => {
                if self.changing_password {
                    if is_insert {
                        StatusBarState::form_insert()
                    } else {
                        StatusBarState::form_normal()
                    }
                } else {
                    StatusBarState::profile()
                }
            }
        }
    }
}

fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor
        .saturating_add_signed(delta)
        .min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> PortalApp {
        let mut config = PortalConfig::sample();
        config.registration.submit_delay_ms = 0;
        PortalApp::new(config)
    }

    fn training_app() -> PortalApp {
        let mut app = app();
        app.set_page(Page::Training);
        app.handle_key(key(KeyCode::Enter)); // sidebar -> content
        app
    }

    #[test]
    fn digit_switches_page_from_sidebar() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.page(), Page::Assessment);
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.page(), Page::Dashboard);
    }

    #[test]
    fn space_toggles_course_under_cursor() {
        let mut app = training_app();
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.wizard.selection().contains("PT"));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char(' ')));
        let order: Vec<String> = app.wizard.selection().iter().map(str::to_string).collect();
        assert_eq!(order, vec!["PT", "MT"]);
    }

    #[test]
    fn advance_without_selection_shows_error() {
        let mut app = training_app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.wizard.step(), WizardStep::Selection);
        let notice = app.message.as_ref().expect("error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn selection_advances_to_form_and_back_preserves_it() {
        let mut app = training_app();
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.wizard.step(), WizardStep::Form);

        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.wizard.step(), WizardStep::Selection);
        assert!(app.wizard.selection().contains("PT"));
    }

    #[tokio::test]
    async fn submission_completes_into_confirmation() {
        let mut app = training_app();
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));

        for c in "Jo".chars() {
            app.full_name.insert(c);
        }
        for c in "jo@x.io".chars() {
            app.email.insert(c);
        }
        for c in "555".chars() {
            app.phone.insert(c);
        }

        app.begin_submission();
        assert!(app.is_submitting());

        // Second submit while in flight must not replace the channel
        app.begin_submission();

        tokio::time::sleep(Duration::from_millis(20)).await;
        app.poll_submission();

        assert_eq!(app.wizard.step(), WizardStep::Confirmation);
        assert_eq!(app.last_registration_id.as_deref(), Some("REG-PT"));
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_error_and_allows_retry() {
        let mut config = PortalConfig::sample();
        config.registration.submit_delay_ms = 0;
        let mut app = PortalApp::with_registrar(
            config,
            Box::new(SimulatedRegistrar::rejecting(Duration::from_millis(1))),
        );
        app.set_page(Page::Training);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));
        for c in "Jo".chars() {
            app.full_name.insert(c);
        }
        for c in "jo@x.io".chars() {
            app.email.insert(c);
        }
        for c in "555".chars() {
            app.phone.insert(c);
        }
        app.begin_submission();

        tokio::time::sleep(Duration::from_millis(20)).await;
        app.poll_submission();

        assert_eq!(app.wizard.step(), WizardStep::Form);
        let notice = app.message.as_ref().expect("error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("submission failed"));
        assert!(!app.is_submitting());
    }

    #[tokio::test]
    async fn leaving_training_cancels_submission() {
        let mut app = training_app();
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));
        for c in "Jo".chars() {
            app.full_name.insert(c);
        }
        for c in "jo@x.io".chars() {
            app.email.insert(c);
        }
        for c in "555".chars() {
            app.phone.insert(c);
        }
        app.begin_submission();

        app.set_page(Page::Dashboard);
        assert!(!app.is_submitting());

        tokio::time::sleep(Duration::from_millis(20)).await;
        app.poll_submission();

        // The late result was discarded; the form is still there to retry
        app.set_page(Page::Training);
        assert_eq!(app.wizard.step(), WizardStep::Form);
    }

    #[test]
    fn assessment_enter_follows_registry_action() {
        let mut app = app();
        app.set_page(Page::Assessment);
        app.handle_key(key(KeyCode::Enter)); // focus content
        app.handle_key(key(KeyCode::Enter)); // completed -> download
        let notice = app.message.as_ref().expect("notice");
        assert!(notice.text.contains("downloaded"));
    }

    #[test]
    fn mock_test_requires_availability() {
        let mut app = app();
        app.set_page(Page::Courses);
        app.handle_key(key(KeyCode::Enter));

        // Second enrollment has no mock test
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Char('t')));
        assert!(app.mock_test.is_none());
        assert_eq!(app.message.as_ref().unwrap().kind, NoticeKind::Error);

        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('t')));
        assert!(app.mock_test.is_some());
    }

    #[test]
    fn mock_test_answers_with_digits() {
        let mut app = app();
        app.set_page(Page::Courses);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('t')));

        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('3')));

        let test = app.mock_test.as_ref().unwrap();
        assert_eq!(test.answers[0], Some(1));
        assert_eq!(test.answers[1], Some(2));
        assert_eq!(test.answered(), 2);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.mock_test.is_none());
    }

    #[test]
    fn password_change_validates_length_and_match() {
        let mut app = app();
        app.set_page(Page::Profile);
        app.handle_key(key(KeyCode::Enter)); // focus content
        app.handle_key(key(KeyCode::Enter)); // open form
        assert!(app.changing_password);
        assert_eq!(app.vim_mode, VimMode::Insert);

        for c in "old-secret".chars() {
            app.current_password.insert(c);
        }
        for c in "short".chars() {
            app.new_password.insert(c);
        }
        app.submit_password_change();
        assert!(app.changing_password);
        assert_eq!(app.message.as_ref().unwrap().kind, NoticeKind::Error);

        app.new_password.clear();
        app.confirm_password.clear();
        for c in "long-enough".chars() {
            app.new_password.insert(c);
            app.confirm_password.insert(c);
        }
        app.submit_password_change();
        assert!(!app.changing_password);
        assert_eq!(app.message.as_ref().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn average_score_over_sample_data() {
        let app = app();
        let avg = app.average_score().unwrap();
        // (85 + 90 + 88) / 3
        assert!((avg - 87.666).abs() < 0.01);
    }

    #[test]
    fn average_score_empty_when_no_scores() {
        let mut config = PortalConfig::sample();
        for assessment in &mut config.assessments {
            assessment.theory_score = None;
            assessment.practical_score = None;
        }
        let app = PortalApp::new(config);
        assert!(app.average_score().is_none());
    }
}
