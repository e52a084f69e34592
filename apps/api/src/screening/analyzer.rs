//! Analyzer: runs one analysis batch end to end and handles manual rescoring.
//!
//! Per resume: save → extract → normalize → similarity → detect experience →
//! match keywords → suggestions → compose score → store. Files are processed
//! one after another; the job description's keywords are extracted once per batch.

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::models::record::{
    DetectedExperience, ExperienceBucket, ResumeRecord, ResumeSummary, RoleType,
};
use crate::screening::experience::detect_experience;
use crate::screening::keywords::{extract_keywords, match_keywords};
use crate::screening::normalize::clean_text;
use crate::screening::ranking::{rank, RankedResults};
use crate::screening::scoring::{compose_score, rescore_score};
use crate::screening::suggestions::{generate_suggestions, SuggestionInput};
use crate::similarity::similarity_score;
use crate::state::AppState;
use crate::store::ResultStore;

pub const EMPTY_JOB_DESCRIPTION: &str = "Please describe job requirements.";
pub const NO_RESUMES: &str = "Please upload at least one resume.";

/// One uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub filename: String,
    pub data: Bytes,
}

/// Scores every uploaded resume against `job_description` and ranks this batch.
///
/// Validation happens before anything touches disk. Records from earlier runs
/// stay in the store, but only this batch is ranked in the response. The batch
/// is stored only once every resume has scored; on error the store is left
/// untouched (files already saved to the upload directory remain there).
pub async fn analyze(
    state: &AppState,
    job_description: &str,
    role: RoleType,
    files: Vec<UploadedResume>,
) -> Result<RankedResults, AppError> {
    let job_description = job_description.trim();
    if job_description.is_empty() {
        return Err(AppError::Validation(EMPTY_JOB_DESCRIPTION.to_string()));
    }
    if files.is_empty() {
        return Err(AppError::Validation(NO_RESUMES.to_string()));
    }

    let run_id = Uuid::new_v4();
    let keywords = extract_keywords(
        state.pipeline.as_ref(),
        job_description,
        state.config.keyword_limit,
    );
    info!(
        "Analysis run {run_id}: {} resume(s), role={role}, {} keyword(s), backend={}",
        files.len(),
        keywords.len(),
        state.similarity.backend()
    );

    let mut records = Vec::with_capacity(files.len());
    for file in files {
        let path = state.uploads.save(&file.filename, file.data).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.filename.clone());

        let raw_text = extract_text(path).await;
        let cleaned_text = clean_text(&raw_text);
        let similarity =
            similarity_score(state.similarity.as_ref(), &cleaned_text, job_description).await?;

        let detected_experience = match role {
            RoleType::Job => detect_experience(&raw_text),
            RoleType::Internship => DetectedExperience::Unknown,
        };
        let missing_experience =
            role == RoleType::Job && detected_experience == DetectedExperience::Unknown;

        let keyword_match = match_keywords(&cleaned_text, &keywords);
        let suggestions = generate_suggestions(&SuggestionInput {
            role,
            missed_keywords: &keyword_match.missed,
            text: &cleaned_text,
            detected: detected_experience,
        });
        let score = compose_score(similarity, role, detected_experience);

        debug!(
            "{filename}: similarity={similarity:.2} base={} experience={detected_experience:?} matched={}/{} final={}",
            score.base_score,
            keyword_match.matched.len(),
            keywords.len(),
            score.final_score
        );

        let record = ResumeRecord {
            filename,
            run_id,
            raw_text,
            cleaned_text,
            detected_experience,
            experience_value: score.experience_value,
            missing_experience,
            experience_bucket: None,
            matched_keywords: keyword_match.matched,
            missed_keywords: keyword_match.missed,
            similarity_score: similarity,
            final_score: score.final_score,
            suggestions,
            role_type: role,
            job_description: job_description.to_string(),
            analyzed_at: Utc::now(),
        };
        records.push(record);
    }

    let summaries = records.iter().map(ResumeSummary::from).collect();
    for record in records {
        state.store.put(record).await;
    }

    let ranked = rank(summaries);
    info!(
        "Analysis run {run_id} done: {} shortlisted, {} rejected",
        ranked.shortlisted.len(),
        ranked.rejected.len()
    );
    Ok(ranked)
}

/// Rescores one stored resume with a manually chosen experience bucket, then
/// ranks every record in the store.
///
/// An unknown filename changes nothing. An unrecognized bucket still rescores,
/// just without an experience adjustment.
pub async fn rescore(
    state: &AppState,
    filename: &str,
    bucket_label: &str,
) -> Result<RankedResults, AppError> {
    let Some(mut record) = state.store.get(filename).await else {
        warn!("Rescore requested for unknown resume '{filename}'");
        return Ok(ranked_results(&state.store).await);
    };

    let bucket = ExperienceBucket::parse(bucket_label);
    if bucket.is_none() {
        warn!("Unrecognized experience bucket '{bucket_label}' for {filename}; no adjustment");
    }

    let similarity = similarity_score(
        state.similarity.as_ref(),
        &record.cleaned_text,
        &record.job_description,
    )
    .await?;
    let score = rescore_score(similarity, bucket);

    info!(
        "Rescored {filename} with bucket '{bucket_label}': {} -> {}",
        record.final_score, score.final_score
    );

    record.similarity_score = similarity;
    record.experience_value = score.experience_value;
    record.final_score = score.final_score;
    record.missing_experience = false;
    record.experience_bucket = Some(bucket_label.to_string());
    record.analyzed_at = Utc::now();
    state.store.put(record).await;

    Ok(ranked_results(&state.store).await)
}

/// Ranks every record currently held in the store.
pub async fn ranked_results(store: &ResultStore) -> RankedResults {
    let records = store.list().await;
    rank(records.iter().map(ResumeSummary::from).collect())
}
