//! The `colleges`, `exams`, and `scholarships` commands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gyandarshak_core::model::{
    College, CollegeFilter, Exam, ExamFilter, Scholarship, ScholarshipFilter,
};
use gyandarshak_core::CounsellingApi;

use super::{api_error, or_dash, Context};

pub async fn colleges(config_path: Option<PathBuf>, filter: CollegeFilter) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let colleges = ctx.api.colleges(&filter).await.map_err(api_error)?;
    if colleges.is_empty() {
        println!("No colleges found for these filters.");
    } else {
        println!("{}", college_table(&colleges));
    }
    Ok(())
}

pub async fn exams(config_path: Option<PathBuf>, filter: ExamFilter) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let exams = ctx.api.exams(&filter).await.map_err(api_error)?;
    if exams.is_empty() {
        println!("No exams found for these filters.");
    } else {
        println!("{}", exam_table(&exams));
    }
    Ok(())
}

pub async fn scholarships(config_path: Option<PathBuf>, filter: ScholarshipFilter) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let scholarships = ctx.api.scholarships(&filter).await.map_err(api_error)?;
    if scholarships.is_empty() {
        println!("No scholarships found for these filters.");
    } else {
        println!("{}", scholarship_table(&scholarships));
    }
    Ok(())
}

const ELIGIBILITY_FALLBACK: &str = "Eligibility details will be explained in counselling.";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn college_table(colleges: &[College]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["College", "Location", "Partner", "Courses", "Website"]);

    for college in colleges {
        let courses = college
            .courses
            .iter()
            .map(|c| match c.approx_fee_total {
                Some(fee) => format!("{} (~₹{fee:.0})", c.name),
                None => c.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&college.name),
            Cell::new(format!("{}, {}", college.city, college.state)),
            Cell::new(if college.is_partner { "yes" } else { "" }),
            Cell::new(or_dash(Some(courses.as_str()))),
            Cell::new(or_dash(college.website_url.as_deref())),
        ]);
    }
    table
}

fn exam_table(exams: &[Exam]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Exam", "Level", "Stream", "Dates", "Website"]);

    for exam in exams {
        let mut dates = exam.dates.clone();
        dates.sort_by_key(|d| d.date);
        let dates = dates
            .iter()
            .map(|d| format!("{}: {}", d.event_type, d.date.format("%d %b %Y")))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&exam.name),
            Cell::new(or_dash(exam.level.as_deref())),
            Cell::new(or_dash(exam.stream.as_deref())),
            Cell::new(or_dash(Some(dates.as_str()))),
            Cell::new(or_dash(exam.official_website.as_deref())),
        ]);
    }
    table
}

fn scholarship_table(scholarships: &[Scholarship]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Scholarship",
        "Provider",
        "Level",
        "State",
        "Amount",
        "Last date",
        "Eligibility",
    ]);

    for s in scholarships {
        let provider = match (&s.provider_name, &s.provider_type) {
            (Some(name), Some(kind)) => format!("{name} ({kind})"),
            (Some(name), None) => name.clone(),
            (None, Some(kind)) => kind.clone(),
            (None, None) => String::new(),
        };
        let last_date = s
            .last_date
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(or_dash(Some(provider.as_str()))),
            Cell::new(or_dash(s.level.as_deref())),
            Cell::new(non_blank(s.state.as_deref()).unwrap_or("All")),
            Cell::new(or_dash(s.amount_description.as_deref())),
            Cell::new(or_dash(Some(last_date.as_str()))),
            Cell::new(
                non_blank(s.eligibility_summary_en.as_deref()).unwrap_or(ELIGIBILITY_FALLBACK),
            ),
        ]);
    }
    table
}
