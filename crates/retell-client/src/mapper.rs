//! Wire-to-domain translation.
//!
//! All functions here are pure apart from [`map_agent`] reading the clock
//! for `created_at`, which Retell does not provide.

use chrono::{DateTime, Utc};
use retell_core::nullable;
use retell_core::{
    Agent, AgentPrompt, AgentVersion, EpochMillis, PiiConfig, PronunciationEntry, ResponseEngine,
    UserDtmfOptions,
};

use crate::wire::{
    AgentRecord, AgentVersionRecord, LlmRecord, PiiRecord, PronunciationRecord,
    ResponseEngineRecord, UserDtmfRecord,
};

pub const DEFAULT_MODEL: &str = "unknown";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Maps an agent using the current time as its creation time.
pub fn map_agent(record: AgentRecord) -> Agent {
    map_agent_at(record, Utc::now())
}

/// Maps an agent with an explicit creation time.
///
/// A missing modification timestamp falls back to `now` as well.
pub fn map_agent_at(record: AgentRecord, now: DateTime<Utc>) -> Agent {
    let model = record
        .response_engine
        .as_ref()
        .and_then(|engine| engine.engine_type.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let updated_at = record
        .last_modification_timestamp
        .map(|ms| EpochMillis(ms).to_datetime())
        .unwrap_or(now);

    Agent {
        id: record.agent_id,
        name: record.agent_name.unwrap_or_default(),
        prompt: record.system_prompt.unwrap_or_default(),
        voice_id: record.voice_id,
        language: record.language,
        model: Some(model),
        temperature: Some(record.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        max_tokens: Some(record.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
        version: record.version,
        version_title: record.version_title,
        channel: record.channel,
        is_published: record.is_published,
        response_engine: record.response_engine.map(map_response_engine),
        created_at: now,
        updated_at,
    }
}

/// Combines an agent and its LLM into the agent's prompt.
///
/// The LLM timestamp is milliseconds, same as the agent's.
pub fn map_agent_prompt(agent: &AgentRecord, llm: LlmRecord, now: DateTime<Utc>) -> AgentPrompt {
    AgentPrompt {
        agent_id: agent.agent_id.clone(),
        prompt: llm.general_prompt.unwrap_or_default(),
        version: llm.version,
        version_title: agent.version_title.clone(),
        updated_at: llm
            .last_modification_timestamp
            .map(|ms| EpochMillis(ms).to_datetime())
            .unwrap_or(now),
    }
}

/// Renames every field of a version record. No values are changed.
pub fn map_agent_version(record: AgentVersionRecord) -> AgentVersion {
    AgentVersion {
        agent_id: record.agent_id,
        version: record.version,
        is_published: record.is_published,
        agent_name: record.agent_name,
        response_engine: nullable::map(record.response_engine, map_response_engine),
        voice_id: record.voice_id,
        voice_model: record.voice_model,
        fallback_voice_ids: record.fallback_voice_ids,
        voice_temperature: record.voice_temperature,
        voice_speed: record.voice_speed,
        volume: record.volume,
        responsiveness: record.responsiveness,
        interruption_sensitivity: record.interruption_sensitivity,
        enable_backchannel: record.enable_backchannel,
        backchannel_frequency: record.backchannel_frequency,
        backchannel_words: record.backchannel_words,
        ambient_sound: record.ambient_sound,
        ambient_sound_volume: record.ambient_sound_volume,
        language: record.language,
        reminder_trigger_ms: record.reminder_trigger_ms,
        reminder_max_count: record.reminder_max_count,
        end_call_after_silence_ms: record.end_call_after_silence_ms,
        max_call_duration_ms: record.max_call_duration_ms,
        begin_message_delay_ms: record.begin_message_delay_ms,
        ring_duration_ms: record.ring_duration_ms,
        voicemail_option: record.voicemail_option,
        stt_mode: record.stt_mode,
        vocab_specialization: record.vocab_specialization,
        boosted_keywords: record.boosted_keywords,
        enable_transcription_formatting: record.enable_transcription_formatting,
        normalize_for_speech: record.normalize_for_speech,
        pronunciation_dictionary: nullable::map(record.pronunciation_dictionary, |entries| {
            entries.into_iter().map(map_pronunciation).collect()
        }),
        opt_out_sensitive_data_storage: record.opt_out_sensitive_data_storage,
        opt_in_signed_url: record.opt_in_signed_url,
        pii_config: nullable::map(record.pii_config, map_pii),
        allow_user_dtmf: record.allow_user_dtmf,
        user_dtmf_options: nullable::map(record.user_dtmf_options, map_dtmf),
        denoising_mode: record.denoising_mode,
        webhook_url: record.webhook_url,
        post_call_analysis_data: record.post_call_analysis_data,
        post_call_analysis_model: record.post_call_analysis_model,
        last_modification_timestamp: EpochMillis(record.last_modification_timestamp),
    }
}

fn map_response_engine(engine: ResponseEngineRecord) -> ResponseEngine {
    ResponseEngine {
        engine_type: engine.engine_type,
        llm_id: engine.llm_id,
        version: engine.version,
    }
}

fn map_pronunciation(entry: PronunciationRecord) -> PronunciationEntry {
    PronunciationEntry {
        word: entry.word,
        alphabet: entry.alphabet,
        phoneme: entry.phoneme,
    }
}

fn map_dtmf(options: UserDtmfRecord) -> UserDtmfOptions {
    UserDtmfOptions {
        digit_limit: options.digit_limit,
        termination_key: options.termination_key,
        timeout_ms: options.timeout_ms,
    }
}

fn map_pii(config: PiiRecord) -> PiiConfig {
    PiiConfig {
        mode: config.mode,
        categories: config.categories,
    }
}
