//! Demo content used when no document source is configured.
//!
//! [`MockContentGenerator`] fills a fixed per-language template and stamps it
//! with the requesting tab and the local time. A configurable share of calls
//! fails with [`ContentError::Transient`] so the error and retry paths of the
//! widget get exercised.


use chrono::{Local, NaiveTime};
use rand::RngExt;

use crate::language::Language;

/// Default probability of a simulated transient failure.
pub const DEFAULT_FAILURE_RATE: f64 = 0.05;

/// Error produced by the mock generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// Simulated network failure; retrying may succeed.
    #[error("simulated network error")]
    Transient,
}

/// Decides whether a mock request fails.
pub trait FailureSampler: Send + Sync {
    /// Returns `true` when the current request should fail.
    fn should_fail(&self) -> bool;
}

/// Fails with a fixed probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomFailure {
    rate: f64,
}

impl RandomFailure {
    /// Fail with probability `rate`, clamped to `[0, 1]`.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }

    /// Failure probability.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for RandomFailure {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl FailureSampler for RandomFailure {
    fn should_fail(&self) -> bool {
        rand::rng().random::<f64>() < self.rate
    }
}

/// Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FailureSampler for NeverFail {
    fn should_fail(&self) -> bool {
        false
    }
}

/// Body of a template section.
enum SectionBody {
    Text(&'static str),
    /// Items as (label, text).
    List(&'static [(&'static str, &'static str)]),
}

struct Section {
    heading: &'static str,
    body: SectionBody,
}

struct Template {
    title: &'static str,
    sections: [Section; 3],
    note_label: &'static str,
}

const FR: Template = Template {
    title: "Contenu en Français",
    sections: [
        Section {
            heading: "Introduction",
            body: SectionBody::Text(
                "Bienvenue dans notre système de contenu multilingue. Cette interface permet de gérer facilement du contenu dans différentes langues avec une expérience utilisateur optimisée.",
            ),
        },
        Section {
            heading: "Fonctionnalités Principales",
            body: SectionBody::List(&[
                ("Chargement intelligent :", "Le contenu se charge uniquement quand nécessaire"),
                ("Gestion d'état :", "Vos préférences sont automatiquement sauvegardées"),
                ("Interface intuitive :", "Navigation fluide entre les différentes langues"),
                ("Performance optimisée :", "Transitions rapides et mémoire efficace"),
            ]),
        },
        Section {
            heading: "Utilisation",
            body: SectionBody::Text(
                "Cliquez simplement sur les onglets pour naviguer entre les langues. Utilisez l'icône de configuration pour personnaliser les langues disponibles selon vos besoins.",
            ),
        },
    ],
    note_label: "Note technique :",
};

const EN: Template = Template {
    title: "Content in English",
    sections: [
        Section {
            heading: "Introduction",
            body: SectionBody::Text(
                "Welcome to our multilingual content system. This interface allows you to easily manage content in different languages with an optimized user experience.",
            ),
        },
        Section {
            heading: "Key Features",
            body: SectionBody::List(&[
                ("Smart Loading:", "Content loads only when necessary"),
                ("State Management:", "Your preferences are automatically saved"),
                ("Intuitive Interface:", "Smooth navigation between different languages"),
                ("Optimized Performance:", "Fast transitions and efficient memory usage"),
            ]),
        },
        Section {
            heading: "Usage",
            body: SectionBody::Text(
                "Simply click on the tabs to navigate between languages. Use the configuration icon to customize available languages according to your needs.",
            ),
        },
    ],
    note_label: "Technical note:",
};

const ES: Template = Template {
    title: "Contenido en Español",
    sections: [
        Section {
            heading: "Introducción",
            body: SectionBody::Text(
                "Bienvenido a nuestro sistema de contenido multilingüe. Esta interfaz permite gestionar fácilmente contenido en diferentes idiomas con una experiencia de usuario optimizada.",
            ),
        },
        Section {
            heading: "Características Principales",
            body: SectionBody::List(&[
                ("Carga Inteligente:", "El contenido se carga solo cuando es necesario"),
                ("Gestión de Estado:", "Tus preferencias se guardan automáticamente"),
                ("Interfaz Intuitiva:", "Navegación fluida entre diferentes idiomas"),
                ("Rendimiento Optimizado:", "Transiciones rápidas y uso eficiente de memoria"),
            ]),
        },
        Section {
            heading: "Uso",
            body: SectionBody::Text(
                "Simplemente haz clic en las pestañas para navegar entre idiomas. Usa el icono de configuración para personalizar los idiomas disponibles según tus necesidades.",
            ),
        },
    ],
    note_label: "Nota técnica:",
};

const DE: Template = Template {
    title: "Inhalt auf Deutsch",
    sections: [
        Section {
            heading: "Einführung",
            body: SectionBody::Text(
                "Willkommen zu unserem mehrsprachigen Content-System. Diese Oberfläche ermöglicht es, Inhalte in verschiedenen Sprachen einfach zu verwalten mit einer optimierten Benutzererfahrung.",
            ),
        },
        Section {
            heading: "Hauptmerkmale",
            body: SectionBody::List(&[
                ("Intelligentes Laden:", "Inhalte werden nur bei Bedarf geladen"),
                ("Zustandsverwaltung:", "Ihre Einstellungen werden automatisch gespeichert"),
                ("Intuitive Oberfläche:", "Reibungslose Navigation zwischen verschiedenen Sprachen"),
                ("Optimierte Leistung:", "Schnelle Übergänge und effiziente Speichernutzung"),
            ]),
        },
        Section {
            heading: "Verwendung",
            body: SectionBody::Text(
                "Klicken Sie einfach auf die Registerkarten, um zwischen den Sprachen zu navigieren. Verwenden Sie das Konfigurationssymbol, um verfügbare Sprachen nach Ihren Bedürfnissen anzupassen.",
            ),
        },
    ],
    note_label: "Technischer Hinweis:",
};

const IT: Template = Template {
    title: "Contenuto in Italiano",
    sections: [
        Section {
            heading: "Introduzione",
            body: SectionBody::Text(
                "Benvenuto nel nostro sistema di contenuti multilingue. Questa interfaccia permette di gestire facilmente contenuti in diverse lingue con un'esperienza utente ottimizzata.",
            ),
        },
        Section {
            heading: "Caratteristiche Principali",
            body: SectionBody::List(&[
                ("Caricamento Intelligente:", "Il contenuto si carica solo quando necessario"),
                ("Gestione dello Stato:", "Le tue preferenze vengono salvate automaticamente"),
                ("Interfaccia Intuitiva:", "Navigazione fluida tra diverse lingue"),
                ("Prestazioni Ottimizzate:", "Transizioni rapide e uso efficiente della memoria"),
            ]),
        },
        Section {
            heading: "Utilizzo",
            body: SectionBody::Text(
                "Basta cliccare sulle schede per navigare tra le lingue. Usa l'icona di configurazione per personalizzare le lingue disponibili secondo le tue esigenze.",
            ),
        },
    ],
    note_label: "Nota tecnica:",
};

fn template(language: Language) -> &'static Template {
    match language {
        Language::Fr => &FR,
        Language::En => &EN,
        Language::Es => &ES,
        Language::De => &DE,
        Language::It => &IT,
    }
}

/// Generates demo documents from in-memory templates.
pub struct MockContentGenerator {
    sampler: Box<dyn FailureSampler>,
}

impl MockContentGenerator {
    /// Generator failing with probability `failure_rate`.
    #[must_use]
    pub fn new(failure_rate: f64) -> Self {
        Self::with_sampler(RandomFailure::new(failure_rate))
    }

    /// Generator with a custom failure decision.
    #[must_use]
    pub fn with_sampler(sampler: impl FailureSampler + 'static) -> Self {
        Self {
            sampler: Box::new(sampler),
        }
    }

    /// Demo page for `tab` in `language`, stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Transient`] when the sampler decides to fail.
    pub fn generate(&self, language: Language, tab: &str) -> Result<String, ContentError> {
        if self.sampler.should_fail() {
            tracing::debug!(%language, tab, "Simulated network error");
            return Err(ContentError::Transient);
        }
        Ok(Self::render(language, tab, Local::now().time()))
    }

    /// Demo page stamped with an explicit time.
    #[must_use]
    pub fn render(language: Language, tab: &str, time: NaiveTime) -> String {
        let t = template(language);
        let mut html = String::with_capacity(2048);

        html.push_str("<div class=\"content-container\">\n");
        html.push_str(&format!(
            "  <h1 class=\"text-2xl font-bold text-slate-800 mb-6\">{}</h1>\n",
            t.title
        ));

        for section in &t.sections {
            html.push_str("  <div class=\"mb-8\">\n");
            html.push_str(&format!(
                "    <h2 class=\"text-xl font-semibold text-slate-700 mb-4\">{}</h2>\n",
                section.heading
            ));
            html.push_str("    <div class=\"text-slate-600 leading-relaxed\">");
            match section.body {
                SectionBody::Text(text) => html.push_str(text),
                SectionBody::List(items) => {
                    html.push_str("<ul>");
                    for (label, text) in items {
                        html.push_str(&format!("<li><strong>{label}</strong> {text}</li>"));
                    }
                    html.push_str("</ul>");
                }
            }
            html.push_str("</div>\n  </div>\n");
        }

        html.push_str(&format!(
            "  <div class=\"mt-8 p-4 bg-blue-50 rounded-lg border border-blue-200\">\n    \
             <p class=\"text-sm text-blue-700\"><strong>{label}</strong> tab {tab} · {code} · {time}</p>\n  \
             </div>\n",
            label = t.note_label,
            tab = fable_renderer::escape_html(tab),
            code = language.code().to_uppercase(),
            time = time.format("%H:%M:%S"),
        ));
        html.push_str("</div>\n");
        html
    }
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl std::fmt::Debug for MockContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockContentGenerator").finish_non_exhaustive()
    }
}
