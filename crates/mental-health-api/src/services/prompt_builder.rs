//! Fixed prompt templates for the agent.
//!
//! Fields are embedded verbatim: no escaping, no validation, and placeholder-like
//! text inside a field is never substituted a second time.

use crate::models::chat::PatientProfile;

pub fn build_query_prompt(user_name: &str, query: &str) -> String {
    format!(
        "Provide a thoughtful, informative, and supportive response to the following query from {user_name}: {query}. \
         While offering medically relevant advice where appropriate, ensure to highlight that it is not a substitute for professional healthcare. \
         Suggest helpful resources, coping strategies, and recommend consulting a healthcare provider for personalized care."
    )
}

pub fn build_report_prompt(
    user_name: &str,
    age: &str,
    gender: &str,
    medical_history: &str,
    current_medications: &str,
) -> String {
    format!(
        "Generate a health report summary for the following patient details:\n\
         Name: {user_name}\n\
         Age: {age}\n\
         Gender: {gender}\n\
         Medical History: {medical_history}\n\
         Current Medications: {current_medications}.\n\
         Provide a detailed summary, including potential health considerations and recommendations for further care."
    )
}

pub fn build_report_prompt_for(profile: &PatientProfile) -> String {
    build_report_prompt(
        &profile.user_name,
        &profile.age,
        &profile.gender,
        &profile.medical_history,
        &profile.current_medications,
    )
}
