//! Product knowledge base
//!
//! Static product descriptions used to ground the assistant. The lookup is
//! total: every context tag resolves to an entry, unknown tags included.

/// Context tag that selects the UrbanFix knowledge base
pub const JOBS_TAG: &str = "jobs";

const URBANFIX_KNOWLEDGE: &str = "UrbanFix Jobs es un marketplace de servicios locales. Características clave: Usa pagos en Escrow (el dinero se retiene hasta finalizar el trabajo). Se verifica la identidad de los usuarios con documento y selfie para seguridad. Los trabajos se publican gratis. Hay chat integrado y sistema de calificación.";

const REPORFLOW_KNOWLEDGE: &str = "ReporFlow es una herramienta SaaS para empresas. Función principal: Automatizar reportes de trabajo de campo. Tiene una App móvil para que los trabajadores suban fotos y horas, y una Web para que los administradores gestionen todo. Genera reportes en Excel automáticos listos para nómina. Se organiza por Grupos de trabajo o Proyectos.";

/// Product a request is about
///
/// `ReporFlow` is the default: any tag other than `"jobs"`, including a
/// missing one, resolves to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductContext {
    /// UrbanFix Jobs marketplace (tag `"jobs"`)
    UrbanFix,
    /// ReporFlow field-report SaaS
    #[default]
    ReporFlow,
}

impl ProductContext {
    /// Resolve a context tag; never fails
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(JOBS_TAG) => ProductContext::UrbanFix,
            _ => ProductContext::default(),
        }
    }

    /// Canonical tag for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductContext::UrbanFix => JOBS_TAG,
            ProductContext::ReporFlow => "reporflow",
        }
    }
}

/// Knowledge for a single product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    /// Name the assistant introduces itself for
    pub display_name: String,
    /// Product facts injected into the system instruction
    pub knowledge_text: String,
}

impl KnowledgeEntry {
    pub fn new(display_name: impl Into<String>, knowledge_text: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            knowledge_text: knowledge_text.into(),
        }
    }
}

/// One entry per [`ProductContext`], fixed at construction
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    urbanfix: KnowledgeEntry,
    reporflow: KnowledgeEntry,
}

impl KnowledgeBase {
    pub fn new(urbanfix: KnowledgeEntry, reporflow: KnowledgeEntry) -> Self {
        Self {
            urbanfix,
            reporflow,
        }
    }

    /// Entry for a resolved context
    pub fn entry(&self, context: ProductContext) -> &KnowledgeEntry {
        match context {
            ProductContext::UrbanFix => &self.urbanfix,
            ProductContext::ReporFlow => &self.reporflow,
        }
    }

    /// Resolve a raw tag straight to its entry
    pub fn lookup(&self, tag: Option<&str>) -> (ProductContext, &KnowledgeEntry) {
        let context = ProductContext::from_tag(tag);
        (context, self.entry(context))
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(
            KnowledgeEntry::new("UrbanFix", URBANFIX_KNOWLEDGE),
            KnowledgeEntry::new("ReporFlow", REPORFLOW_KNOWLEDGE),
        )
    }
}
