//! Chat endpoint
//!
//! The natural-language entry point: parse a date phrase out of the
//! message, classify it, aggregate the ledger over the resolved range,
//! and answer via the LLM with the aggregates as grounding context.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    nlq,
    services::context::{system_prompt, ChatContext, Visualization},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Free-text question, e.g. "how was revenue last weekend?"
    pub message: String,
    /// Override for "today"; defaults to the venue's current business
    /// date. Keeps date parsing deterministic for tests.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Natural-language answer
    pub response: String,
    /// The structured context the answer was grounded in
    pub context: ChatContext,
    /// Chart entries for the dashboard
    pub visualizations: Vec<Visualization>,
}

/// Answer a natural-language question about venue revenue
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer with grounding context", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 502, description = "LLM backend failure")
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(crate::error::AppError::Validation(
            "message must not be empty".to_string(),
        ));
    }

    let today = request.today.unwrap_or_else(|| state.config.venue.business_today());
    let query_type = nlq::classify(&request.message);

    // Comparative queries resolve two ranges; everything else resolves
    // one, falling back to the default recent window on a parse miss.
    let aggregator = &state.services.aggregator;
    let context = if let Some((current, previous)) =
        nlq::parse_comparison(&request.message, today)
    {
        let (cur_agg, prev_agg, deltas) = aggregator.compare(&current, &previous).await?;
        state.services.context.build(
            query_type,
            current,
            true,
            cur_agg,
            Some(prev_agg),
            Some(deltas),
        )
    } else {
        let (range, range_was_parsed) = match nlq::parse(&request.message, today) {
            Some(range) => (range, true),
            None => (aggregator.default_range(today), false),
        };
        let aggregation = aggregator.aggregate(range.start, range.end).await?;
        state
            .services
            .context
            .build(query_type, range, range_was_parsed, aggregation, None, None)
    };

    tracing::debug!(
        query_type = ?context.query_type,
        range = %context.range.label,
        day_count = context.aggregation.day_count,
        "resolved chat context"
    );

    // Without an API key the rendered context stands in for the LLM
    // answer, which keeps the endpoint usable in development.
    let response = if state.services.claude.is_configured() {
        let system = system_prompt(&state.config.venue, today);
        let user = format!(
            "{}\n\nUser question: {}",
            context.render_prompt(),
            request.message
        );
        state.services.claude.complete(&system, &user).await?
    } else {
        context.render_prompt()
    };

    let visualizations = context.visualizations();
    Ok(Json(ChatResponse {
        response,
        context,
        visualizations,
    }))
}
