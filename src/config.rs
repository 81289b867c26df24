use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::aggregate::StatusTagged;
use crate::error::{PortalError, Result};

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ndt-portal")
        .join("portal.toml")
}

/// Portal configuration and sample datasets.
///
/// Every page reads from this structure instead of module-level constants, so
/// the whole portal can be driven from a TOML file; the built-in defaults
/// carry the demo data.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    pub general: GeneralConfig,
    pub student: StudentConfig,
    pub registration: RegistrationConfig,
    /// Course catalog offered on the registration form
    pub catalog: Vec<CourseOffering>,
    /// Ongoing trainings with chapter detail
    pub enrollments: Vec<Enrollment>,
    pub completed: Vec<CompletedTraining>,
    pub paused: Vec<PausedTraining>,
    pub certificates: Vec<Certificate>,
    pub assessments: Vec<AssessmentRecord>,
}

impl PortalConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using sample data", path);
            let config = Self::sample();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: PortalConfig = toml::from_str(&content)?;
        config.fill_empty_sections();
        config.validate()?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// The built-in demo datasets.
    pub fn sample() -> Self {
        Self {
            general: GeneralConfig::default(),
            student: StudentConfig::default(),
            registration: RegistrationConfig::default(),
            catalog: CourseOffering::sample_catalog(),
            enrollments: Enrollment::samples(),
            completed: CompletedTraining::samples(),
            paused: PausedTraining::samples(),
            certificates: Certificate::samples(),
            assessments: AssessmentRecord::samples(),
        }
    }

    /// A config file may override only some sections; a missing catalog would
    /// leave the registration form unusable, so empty datasets fall back to
    /// the samples.
    fn fill_empty_sections(&mut self) {
        if self.catalog.is_empty() {
            self.catalog = CourseOffering::sample_catalog();
        }
        if self.enrollments.is_empty()
            && self.completed.is_empty()
            && self.paused.is_empty()
            && self.certificates.is_empty()
            && self.assessments.is_empty()
        {
            self.enrollments = Enrollment::samples();
            self.completed = CompletedTraining::samples();
            self.paused = PausedTraining::samples();
            self.certificates = Certificate::samples();
            self.assessments = AssessmentRecord::samples();
        }
    }

    /// Enforce the progress invariants: percentages in 0..=100, completed
    /// chapter counts never above totals, scores in 0..=100.
    pub fn validate(&self) -> Result<()> {
        for enrollment in &self.enrollments {
            if enrollment.percent_complete > 100 {
                return Err(PortalError::InvalidData(format!(
                    "enrollment '{}': percent_complete {} is out of range",
                    enrollment.name, enrollment.percent_complete
                )));
            }
            if enrollment.chapters_completed > enrollment.chapters_total {
                return Err(PortalError::InvalidData(format!(
                    "enrollment '{}': {} chapters completed of {} total",
                    enrollment.name, enrollment.chapters_completed, enrollment.chapters_total
                )));
            }
        }
        for paused in &self.paused {
            if paused.percent_complete > 100 {
                return Err(PortalError::InvalidData(format!(
                    "paused training '{}': percent_complete {} is out of range",
                    paused.name, paused.percent_complete
                )));
            }
        }
        for assessment in &self.assessments {
            for score in [assessment.theory_score, assessment.practical_score]
                .into_iter()
                .flatten()
            {
                if score > 100 {
                    return Err(PortalError::InvalidData(format!(
                        "assessment '{}': score {} is out of range",
                        assessment.course_name, score
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn offering(&self, id: &str) -> Option<&CourseOffering> {
        self.catalog.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    pub subtitle: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Student Portal".to_string(),
            subtitle: "Learning Management System".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StudentConfig {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub phone: String,
    pub joined: String,
    pub standing: String,
}

impl Default for StudentConfig {
    fn default() -> Self {
        Self {
            name: "John Smith".to_string(),
            student_id: "ST-2024-1234".to_string(),
            email: "john.smith@email.com".to_string(),
            phone: "+1 234 567 8900".to_string(),
            joined: "2024-01-05".to_string(),
            standing: "Active Student".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Simulated network latency for the submission collaborator
    pub submit_delay_ms: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { submit_delay_ms: 2000 }
    }
}

/// Training level of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Level1,
    Level2,
    Level3,
    Advanced,
    Specialized,
}

impl CourseLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CourseLevel::Level1 => "Level 1",
            CourseLevel::Level2 => "Level 2",
            CourseLevel::Level3 => "Level 3",
            CourseLevel::Advanced => "Advanced",
            CourseLevel::Specialized => "Specialized",
        }
    }
}

/// Immutable catalog entry, created at load and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseOffering {
    pub id: String,
    pub name: String,
    pub duration_hours: u16,
    pub level: CourseLevel,
}

impl CourseOffering {
    fn entry(id: &str, name: &str, duration_hours: u16, level: CourseLevel) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            duration_hours,
            level,
        }
    }

    fn sample_catalog() -> Vec<Self> {
        use CourseLevel::*;
        vec![
            Self::entry("PT", "PT - Penetrant Testing", 40, Level2),
            Self::entry("MT", "MT - Magnetic Testing", 40, Level2),
            Self::entry("UT", "UT - Ultrasonic Testing", 80, Level2),
            Self::entry("RT", "RT - Radiographic Testing", 80, Level2),
            Self::entry("VT", "VT - Visual Testing", 24, Level2),
            Self::entry("ET", "ET - Eddy Current Testing", 40, Level2),
            Self::entry("MT-HT", "MT - High Temperature", 16, Advanced),
            Self::entry("HT", "HT - Hardness Testing", 16, Level1),
            Self::entry("IMU", "IMU - In-Service Monitoring", 24, Specialized),
            Self::entry("LMIU", "LMIU - Level Measurement", 16, Specialized),
            Self::entry("AMT", "AMT - Advanced Magnetic Testing", 40, Level3),
            Self::entry("ATI", "ATI - Advanced Technical Inspection", 40, Level3),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterKind {
    Video,
    Document,
}

impl ChapterKind {
    pub fn marker(&self) -> &'static str {
        match self {
            ChapterKind::Video => "[video]",
            ChapterKind::Document => "[doc]",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub kind: ChapterKind,
    pub minutes: u16,
    #[serde(default)]
    pub completed: bool,
}

impl Chapter {
    fn entry(title: &str, kind: ChapterKind, minutes: u16, completed: bool) -> Self {
        Self {
            title: title.to_string(),
            kind,
            minutes,
            completed,
        }
    }
}

/// An ongoing training with chapter-level detail for the Courses page.
#[derive(Debug, Clone, Deserialize)]
pub struct Enrollment {
    pub course_id: String,
    pub name: String,
    pub percent_complete: u8,
    pub chapters_completed: u16,
    pub chapters_total: u16,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub mock_test_available: bool,
}

impl Enrollment {
    fn samples() -> Vec<Self> {
        use ChapterKind::*;
        vec![
            Self {
                course_id: "UT".to_string(),
                name: "UT - Ultrasonic Testing".to_string(),
                percent_complete: 65,
                chapters_completed: 13,
                chapters_total: 20,
                chapters: vec![
                    Chapter::entry("Introduction to UT", Video, 15, true),
                    Chapter::entry("UT Equipment", Video, 20, true),
                    Chapter::entry("UT Techniques", Document, 30, true),
                    Chapter::entry("Practical Applications", Video, 25, false),
                    Chapter::entry("Safety Procedures", Document, 15, false),
                ],
                mock_test_available: true,
            },
            Self {
                course_id: "RT".to_string(),
                name: "RT - Radiographic Testing".to_string(),
                percent_complete: 40,
                chapters_completed: 8,
                chapters_total: 20,
                chapters: vec![
                    Chapter::entry("Introduction to RT", Video, 20, true),
                    Chapter::entry("RT Fundamentals", Video, 25, true),
                    Chapter::entry("Film Interpretation", Document, 35, false),
                    Chapter::entry("Digital Radiography", Video, 30, false),
                ],
                mock_test_available: false,
            },
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletedTraining {
    pub name: String,
    pub completed_date: String,
    pub certificate: String,
}

impl CompletedTraining {
    fn samples() -> Vec<Self> {
        vec![
            Self {
                name: "PT - Penetrant Testing".to_string(),
                completed_date: "2024-01-15".to_string(),
                certificate: "PT-2024-001".to_string(),
            },
            Self {
                name: "MT - Magnetic Testing".to_string(),
                completed_date: "2024-02-20".to_string(),
                certificate: "MT-2024-002".to_string(),
            },
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PausedTraining {
    pub name: String,
    pub percent_complete: u8,
    pub last_accessed: String,
}

impl PausedTraining {
    fn samples() -> Vec<Self> {
        vec![Self {
            name: "VT - Visual Testing".to_string(),
            percent_complete: 25,
            last_accessed: "2024-03-01".to_string(),
        }]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub issue_date: String,
    pub valid_until: String,
}

impl Certificate {
    fn samples() -> Vec<Self> {
        vec![
            Self {
                name: "PT Level 2 Certificate".to_string(),
                issue_date: "2024-01-20".to_string(),
                valid_until: "2027-01-20".to_string(),
            },
            Self {
                name: "MT Level 2 Certificate".to_string(),
                issue_date: "2024-02-25".to_string(),
                valid_until: "2027-02-25".to_string(),
            },
        ]
    }
}

/// Final-assessment record. The status string is resolved through the status
/// registry for display.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentRecord {
    pub course_name: String,
    pub status: String,
    #[serde(default)]
    pub theory_score: Option<u8>,
    #[serde(default)]
    pub practical_score: Option<u8>,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub certificate_ready: bool,
}

impl StatusTagged for AssessmentRecord {
    fn status(&self) -> &str {
        &self.status
    }
}

impl AssessmentRecord {
    fn samples() -> Vec<Self> {
        vec![
            Self {
                course_name: "UT - Ultrasonic Testing".to_string(),
                status: "completed".to_string(),
                theory_score: Some(85),
                practical_score: Some(90),
                completed_date: Some("2024-03-15".to_string()),
                certificate_ready: true,
            },
            Self {
                course_name: "RT - Radiographic Testing".to_string(),
                status: "ready".to_string(),
                theory_score: None,
                practical_score: None,
                completed_date: None,
                certificate_ready: false,
            },
            Self {
                course_name: "MT - Magnetic Testing".to_string(),
                status: "pending".to_string(),
                theory_score: Some(88),
                practical_score: None,
                completed_date: None,
                certificate_ready: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_data_is_valid() {
        let config = PortalConfig::sample();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.len(), 12);
        assert_eq!(config.assessments.len(), 3);
        assert!(config.offering("UT").is_some());
        assert!(config.offering("XX").is_none());
    }

    #[test]
    fn missing_file_falls_back_to_sample_data() {
        let config = PortalConfig::load_from("/nonexistent/portal.toml").unwrap();
        assert_eq!(config.catalog.len(), 12);
    }

    #[test]
    fn loads_partial_override_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[general]
title = "Training Desk"

[student]
name = "Ada Byron"

[[catalog]]
id = "UT"
name = "UT - Ultrasonic Testing"
duration_hours = 80
level = "level2"
"#
        )
        .unwrap();

        let config = PortalConfig::load_from(file.path()).unwrap();
        assert_eq!(config.general.title, "Training Desk");
        assert_eq!(config.student.name, "Ada Byron");
        assert_eq!(config.catalog.len(), 1);
        // Untouched datasets keep the samples.
        assert_eq!(config.assessments.len(), 3);
    }

    #[test]
    fn rejects_out_of_range_progress() {
        let mut config = PortalConfig::sample();
        config.enrollments[0].percent_complete = 120;
        assert!(config.validate().is_err());

        let mut config = PortalConfig::sample();
        config.enrollments[0].chapters_completed = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let mut config = PortalConfig::sample();
        config.assessments[0].theory_score = Some(140);
        assert!(config.validate().is_err());
    }
}
