//! Retell API payloads as they arrive on the wire (snake_case).
//!
//! Only fields the gateway reads are declared; anything else the API sends
//! is ignored during deserialization.

use serde::{Deserialize, Serialize};
use retell_core::nullable::{self, Nullable};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEngineRecord {
    #[serde(rename = "type")]
    pub engine_type: Option<String>,
    pub llm_id: Option<String>,
    pub version: Option<i64>,
}

/// An agent as returned by `list-agents` and `get-agent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub system_prompt: Option<String>,
    pub voice_id: Option<String>,
    pub language: Option<String>,
    pub response_engine: Option<ResponseEngineRecord>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub version: Option<i64>,
    pub version_title: Option<String>,
    pub channel: Option<String>,
    pub is_published: Option<bool>,
    /// Milliseconds since the Unix epoch.
    pub last_modification_timestamp: Option<i64>,
}

/// A Retell-hosted LLM configuration (`get-retell-llm`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmRecord {
    pub llm_id: String,
    pub general_prompt: Option<String>,
    pub model: Option<String>,
    pub version: Option<i64>,
    /// Milliseconds since the Unix epoch.
    pub last_modification_timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationRecord {
    pub word: String,
    pub alphabet: String,
    pub phoneme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDtmfRecord {
    pub digit_limit: Option<u32>,
    pub termination_key: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiRecord {
    pub mode: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// One entry of `get-agent-versions`. Explicit `null`s are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentVersionRecord {
    pub agent_id: String,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub version: Nullable<i64>,
    pub is_published: bool,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub agent_name: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub response_engine: Nullable<ResponseEngineRecord>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub voice_id: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub voice_model: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub fallback_voice_ids: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub voice_temperature: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub voice_speed: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub volume: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub responsiveness: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub interruption_sensitivity: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub enable_backchannel: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub backchannel_frequency: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub backchannel_words: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub ambient_sound: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub ambient_sound_volume: Nullable<f64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub language: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub reminder_trigger_ms: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub reminder_max_count: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub end_call_after_silence_ms: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub max_call_duration_ms: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub begin_message_delay_ms: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub ring_duration_ms: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub voicemail_option: Nullable<Value>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub stt_mode: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub vocab_specialization: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub boosted_keywords: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub enable_transcription_formatting: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub normalize_for_speech: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub pronunciation_dictionary: Nullable<Vec<PronunciationRecord>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub opt_out_sensitive_data_storage: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub opt_in_signed_url: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub pii_config: Nullable<PiiRecord>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub allow_user_dtmf: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub user_dtmf_options: Nullable<UserDtmfRecord>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub denoising_mode: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub webhook_url: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub post_call_analysis_data: Nullable<Vec<Value>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub post_call_analysis_model: Nullable<String>,
    pub last_modification_timestamp: i64,
}
