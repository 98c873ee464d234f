//! Jobs, promotions and education.

use crate::error::{ensure_funds, CommandError};
use rand::Rng;
use sim_core::catalog::{self, months_to_promote, DegreeType, EDUCATION, MAX_JOB_LEVEL};
use sim_core::money::{self, units};
use sim_core::{
    EconomyPhase, EducationReq, GameEvent, GameState, Job, JobField, JobPosition, JobRecord,
    Severity,
};
use tracing::{debug, info};

fn degree_label(id: &str) -> String {
    EDUCATION
        .iter()
        .find(|p| p.degree_id == Some(id))
        .map(|p| p.name.to_string())
        .unwrap_or_else(|| id.replace('_', " "))
}

/// First unmet requirement for `position`, if any.
///
/// A position listing specific degrees accepts any one of them; otherwise the
/// coarse bachelor's/master's requirement applies. The IQ floor always applies.
pub fn missing_requirement(state: &GameState, position: &JobPosition) -> Option<String> {
    let edu = &state.education;
    if !position.required_degrees.is_empty() {
        if !position.required_degrees.iter().any(|d| edu.has_degree(d)) {
            let names: Vec<String> =
                position.required_degrees.iter().map(|d| degree_label(d)).collect();
            return Some(format!("{} requires {}", position.title, names.join(" or ")));
        }
    } else {
        match position.education_req {
            EducationReq::Bachelors if !edu.has_bachelors => {
                return Some(format!("{} requires a bachelor's degree", position.title));
            }
            EducationReq::Masters if !edu.has_masters => {
                return Some(format!("{} requires a master's degree", position.title));
            }
            _ => {}
        }
    }
    if state.financial_iq < position.iq_req {
        return Some(format!(
            "{} requires financial IQ {}",
            position.title, position.iq_req
        ));
    }
    None
}

pub fn requirements_met(state: &GameState, position: &JobPosition) -> bool {
    missing_requirement(state, position).is_none()
}

/// Success chance in percent for applying to (or being promoted into) `position`.
pub fn application_chance(
    state: &GameState,
    position: &JobPosition,
    field: JobField,
    is_promotion: bool,
) -> f64 {
    let mut chance = 60.0;
    if requirements_met(state, position) {
        chance += 20.0;
    }
    let iq_margin = f64::from(state.financial_iq) - f64::from(position.iq_req);
    chance += ((iq_margin / 10.0).floor() * 10.0).min(30.0);
    if state.economy_phase == EconomyPhase::Recession {
        chance -= 20.0;
    }
    if is_promotion && state.is_employed() && state.current_job.field == field {
        chance += 15.0;
    }
    chance.clamp(10.0, 95.0)
}

fn roll_percent(rng: &mut impl Rng, chance: f64) -> bool {
    rng.gen::<f64>() * 100.0 < chance
}

fn set_salary_from_base(state: &mut GameState) {
    state.salary = money::scale(state.base_salary, state.lifestyle.params().salary_mod);
}

pub fn apply_for_job(
    state: &mut GameState,
    rng: &mut impl Rng,
    field: JobField,
    level: u8,
) -> Result<Vec<GameEvent>, CommandError> {
    let position = field
        .position(level)
        .ok_or_else(|| CommandError::UnknownCatalogEntry(format!("{field:?} level {level}")))?;
    if let Some(reason) = missing_requirement(state, position) {
        return Err(CommandError::RequirementNotMet(reason));
    }
    let chance = application_chance(state, position, field, false);
    if !roll_percent(rng, chance) {
        debug!(title = position.title, chance, "application rejected");
        return Ok(vec![GameEvent::new(
            state.month,
            format!("Application for {} was rejected", position.title),
            Severity::Negative,
        )]);
    }

    if state.is_employed() {
        state.job_history.push(JobRecord {
            job: state.current_job.clone(),
            end_month: state.month,
        });
    }
    state.current_job = Job {
        field,
        level,
        title: position.title.to_string(),
        base_salary: units(i64::from(position.base_salary)),
        months_in_position: 0,
    };
    state.base_salary = state.current_job.base_salary;
    set_salary_from_base(state);
    state.has_quit_job = false;
    state.pending_rehire_in_months = None;
    info!(title = position.title, month = state.month, "hired");
    Ok(vec![GameEvent::new(
        state.month,
        format!(
            "Started new job: {} at {}/mo",
            position.title,
            money::format(state.salary)
        ),
        Severity::Positive,
    )])
}

pub fn request_promotion(
    state: &mut GameState,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, CommandError> {
    if !state.is_employed() {
        return Err(CommandError::NotEmployed);
    }
    let job = &state.current_job;
    if job.level >= MAX_JOB_LEVEL {
        return Err(CommandError::requirement("already at the top of the ladder"));
    }
    let needed = months_to_promote(job.level);
    if job.months_in_position < needed {
        return Err(CommandError::requirement(format!(
            "need {} more months in current position",
            needed - job.months_in_position
        )));
    }
    let field = job.field;
    let next_level = job.level + 1;
    let next = field
        .position(next_level)
        .ok_or_else(|| CommandError::UnknownCatalogEntry(format!("{field:?} level {next_level}")))?;
    if let Some(reason) = missing_requirement(state, next) {
        return Err(CommandError::RequirementNotMet(reason));
    }

    let chance = application_chance(state, next, field, true);
    if !roll_percent(rng, chance) {
        return Ok(vec![GameEvent::new(
            state.month,
            format!("Promotion request to {} was denied", next.title),
            Severity::Negative,
        )]);
    }

    let job = &mut state.current_job;
    job.level = next_level;
    job.title = next.title.to_string();
    job.base_salary = units(i64::from(next.base_salary));
    job.months_in_position = 0;
    state.base_salary = state.current_job.base_salary;
    set_salary_from_base(state);
    info!(title = next.title, month = state.month, "promoted");
    Ok(vec![GameEvent::new(
        state.month,
        format!("Promoted to {} at {}/mo", next.title, money::format(state.salary)),
        Severity::Gold,
    )])
}

pub fn quit_job(state: &mut GameState) -> Result<Vec<GameEvent>, CommandError> {
    if !state.is_employed() {
        return Err(CommandError::NotEmployed);
    }
    state.job_history.push(JobRecord {
        job: state.current_job.clone(),
        end_month: state.month,
    });
    state.has_quit_job = true;
    state.salary = rust_decimal::Decimal::ZERO;
    Ok(vec![GameEvent::new(
        state.month,
        "Quit job to focus on businesses!",
        Severity::Gold,
    )])
}

/// Count one more month in the current position.
pub fn advance_tenure(state: &mut GameState) {
    if state.is_employed() {
        state.current_job.months_in_position += 1;
    }
}

/// A 3–10% raise, at most once per year and never in the first year.
pub fn roll_annual_raise(state: &mut GameState, rng: &mut impl Rng) -> Option<GameEvent> {
    if !state.is_employed() || state.month < 13 || state.raise_received_this_year {
        return None;
    }
    if !crate::chance(rng, 0.2) {
        return None;
    }
    let percent = 0.03 + rng.gen::<f64>() * 0.07;
    let raise = money::scale(state.base_salary, percent);
    state.base_salary += raise;
    set_salary_from_base(state);
    state.raise_received_this_year = true;
    Some(GameEvent::new(
        state.month,
        format!("Received a {}/mo raise!", money::format(raise)),
        Severity::Positive,
    ))
}

pub fn enroll_education(
    state: &mut GameState,
    name: &str,
) -> Result<Vec<GameEvent>, CommandError> {
    let program = catalog::find_program(name)
        .ok_or_else(|| CommandError::UnknownCatalogEntry(name.to_string()))?;
    if let Some(id) = program.degree_id {
        if state.education.has_degree(id) {
            return Err(CommandError::requirement(format!("{name} already completed")));
        }
    }
    if program.requires_any_bachelors && !state.education.has_bachelors {
        return Err(CommandError::requirement("any bachelor's degree required"));
    }
    if let Some(missing) = program
        .prerequisites
        .iter()
        .find(|p| !state.education.has_degree(p))
    {
        return Err(CommandError::requirement(format!("requires {}", degree_label(missing))));
    }
    if !program.is_instant() && state.education.in_progress.is_some() {
        return Err(CommandError::requirement("already enrolled in another program"));
    }
    let price = units(i64::from(program.price));
    ensure_funds(price, state.cash)?;

    state.cash -= price;
    if program.is_instant() {
        state.financial_iq += program.iq_gain;
        return Ok(vec![GameEvent::new(
            state.month,
            format!("Completed {} (+{} IQ)", program.name, program.iq_gain),
            Severity::Gold,
        )]);
    }
    state.education.in_progress = Some(program.name.to_string());
    state.education.months_remaining = program.months_required;
    Ok(vec![GameEvent::new(
        state.month,
        format!("Enrolled in {} ({} months)", program.name, program.months_required),
        Severity::Gold,
    )])
}

/// Abandon the current program. Tuition is not refunded.
pub fn quit_education(state: &mut GameState) -> Result<Vec<GameEvent>, CommandError> {
    let name = state.education.in_progress.take().ok_or(CommandError::NotEnrolled)?;
    state.education.months_remaining = 0;
    Ok(vec![GameEvent::new(
        state.month,
        format!("Quit {name} program"),
        Severity::Negative,
    )])
}

/// Count down the program in progress and graduate at zero.
pub fn advance_education(state: &mut GameState) -> Option<GameEvent> {
    let name = state.education.in_progress.clone()?;
    state.education.months_remaining = state.education.months_remaining.saturating_sub(1);
    if state.education.months_remaining > 0 {
        return None;
    }
    state.education.in_progress = None;

    let program = catalog::find_program(&name)?;
    state.financial_iq += program.iq_gain;
    if let Some(id) = program.degree_id {
        state.education.completed_degrees.insert(id.to_string());
    }
    match program.degree_type {
        Some(DegreeType::Bachelors) => {
            state.education.has_bachelors = true;
            state.education.degree_field = Some(program.name.to_string());
        }
        Some(DegreeType::Masters | DegreeType::Mba) => {
            state.education.has_masters = true;
            state.education.degree_field = Some(program.name.to_string());
        }
        _ => {}
    }
    info!(program = program.name, month = state.month, "graduated");
    Some(GameEvent::new(
        state.month,
        format!("Completed {}! +{} IQ", program.name, program.iq_gain),
        Severity::Gold,
    ))
}
