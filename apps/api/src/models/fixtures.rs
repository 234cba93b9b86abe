//! Resume builders shared by test modules.

use crate::models::resume::{
    Certification, Education, Experience, Language, PersonalInfo, Project, ResumeData,
};

pub fn personal_info() -> PersonalInfo {
    PersonalInfo {
        name: "Jordan Rivera".to_string(),
        headline: Some("Backend Engineer".to_string()),
        email: Some("jordan@example.com".to_string()),
        phone: Some("+1 555 0100".to_string()),
        location: Some("Austin, TX".to_string()),
        linkedin: Some("linkedin.com/in/jordanrivera".to_string()),
        ..Default::default()
    }
}

/// A bullet of exactly `len` characters made of short words.
pub fn bullet_of_len(seed: usize, len: usize) -> String {
    let mut text = format!("Delivered item {seed} ");
    while text.len() < len {
        text.push_str("across teams ");
    }
    text.truncate(len);
    text.trim_end().to_string()
}

pub fn experience(id: usize, bullets: Vec<String>) -> Experience {
    Experience {
        id: format!("exp-{id}"),
        title: "Software Engineer".to_string(),
        company: format!("Company {id}"),
        company_url: None,
        location: Some("Remote".to_string()),
        start_date: "2020-01".to_string(),
        end_date: Some("2022-06".to_string()),
        current: false,
        bullets,
    }
}

pub fn education() -> Education {
    Education {
        id: "edu-1".to_string(),
        institution: "State University".to_string(),
        degree: "B.S.".to_string(),
        field: Some("Computer Science".to_string()),
        start_date: Some("2012-09".to_string()),
        end_date: Some("2016-05".to_string()),
        description: Some("Focus on distributed systems and compilers.".to_string()),
        ..Default::default()
    }
}

pub fn project(id: usize) -> Project {
    Project {
        id: format!("proj-{id}"),
        name: format!("Project {id}"),
        description: Some(
            "Open-source job queue with at-least-once delivery and a web dashboard for operators."
                .to_string(),
        ),
        url: Some("github.com/example/queue".to_string()),
        technologies: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        ..Default::default()
    }
}

pub fn certification() -> Certification {
    Certification {
        id: "cert-1".to_string(),
        name: "AWS Solutions Architect".to_string(),
        issuer: Some("Amazon".to_string()),
        date: Some("2021-03".to_string()),
        ..Default::default()
    }
}

pub fn language() -> Language {
    Language {
        id: "lang-1".to_string(),
        name: "Spanish".to_string(),
        proficiency: Some("Fluent".to_string()),
    }
}

/// A twenty-word summary and one experience entry with three short bullets.
pub fn light_resume() -> ResumeData {
    ResumeData {
        personal_info: personal_info(),
        summary: "Backend engineer with six years of experience building reliable APIs, \
                  data pipelines, and internal tooling for fast growing product teams."
            .to_string(),
        experience: vec![experience(
            1,
            vec![
                "Built billing API in Rust".to_string(),
                "Cut p99 latency by 40%".to_string(),
                "Mentored two new hires".to_string(),
            ],
        )],
        ..Default::default()
    }
}

/// Four experience entries with five ~120 character bullets each, plus
/// summary, education, projects and skills.
pub fn heavy_resume() -> ResumeData {
    ResumeData {
        personal_info: personal_info(),
        summary: "Backend engineer with six years of experience building reliable APIs, \
                  data pipelines, and internal tooling for fast growing product teams."
            .to_string(),
        experience: (0..4)
            .map(|i| experience(i, (0..5).map(|b| bullet_of_len(i * 10 + b, 120)).collect()))
            .collect(),
        education: vec![education()],
        projects: vec![project(1), project(2)],
        skills: ["Rust", "Go", "PostgreSQL", "Kafka", "Kubernetes", "AWS", "Terraform"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        ..Default::default()
    }
}

/// Ten experience entries with five 200 character bullets each.
pub fn extreme_resume() -> ResumeData {
    ResumeData {
        personal_info: personal_info(),
        experience: (0..10)
            .map(|i| experience(i, (0..5).map(|b| bullet_of_len(i * 10 + b, 200)).collect()))
            .collect(),
        ..Default::default()
    }
}

/// Every section populated.
pub fn full_resume() -> ResumeData {
    let mut data = heavy_resume();
    data.certifications.push(certification());
    data.languages.push(language());
    data
}
