//! System instruction and fallback texts
//!
//! Fixed contract between the assistant and the model. Only the product name
//! and its knowledge text vary.

use crate::knowledge::KnowledgeEntry;

/// Reply used when the provider cannot be reached or errors out
pub const UPSTREAM_UNAVAILABLE_TEXT: &str =
    "Tuve un problema técnico interno al contactar con la IA. Por favor intenta más tarde.";

/// Reply used when the provider answers with no text (empty or safety-blocked)
pub const EMPTY_OR_BLOCKED_TEXT: &str = "Lo siento, no pude procesar esa pregunta específica debido a mis filtros de seguridad o un error interno. ¿Podrías intentar reformularla?";

/// Build the system instruction for a product
///
/// The model must answer strictly from `entry.knowledge_text`, politely
/// decline unrelated questions, and keep answers short with simple Markdown.
pub fn system_instruction(entry: &KnowledgeEntry) -> String {
    format!(
        "Eres un asistente de soporte técnico experto y amable para {name}. \n  \
         Tu objetivo es ayudar al usuario respondiendo su duda basándote ESTRICTAMENTE en este contexto: \"{knowledge}\".\n  \
         Si la pregunta no tiene nada que ver con el contexto, di amablemente que solo puedes responder sobre la plataforma.\n  \
         Responde de forma breve, concisa y usa formato Markdown simple (negritas, listas) si ayuda a la claridad.",
        name = entry.display_name,
        knowledge = entry.knowledge_text,
    )
}
