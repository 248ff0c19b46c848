//! Localized placeholder content for unresolvable documents.

use fable_renderer::escape_html;

use crate::language::Language;

/// Human-readable title for a fable identifier.
///
/// Each hyphen-separated word gets an upper-case first letter; words are joined
/// with spaces.
///
/// # Examples
///
/// ```
/// use fable_content::format_fable_title;
///
/// assert_eq!(format_fable_title("le-loup-et-l-agneau"), "Le Loup Et L Agneau");
/// ```
#[must_use]
pub fn format_fable_title(fable: &str) -> String {
    fable
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display title of a fable, using the known names of the built-in fables.
#[must_use]
pub fn fable_display_title(fable: &str) -> String {
    match fable {
        "acteon" => "Actéon".to_owned(),
        "laigle-et-le-chapon" => "L'Aigle et le Chapon".to_owned(),
        other => format_fable_title(other),
    }
}

/// Localized strings of the placeholder page.
struct Translation {
    title_suffix: &'static str,
    notice: &'static str,
    message: &'static str,
    description: &'static str,
    technical: &'static str,
    file_label: &'static str,
}

const FR: Translation = Translation {
    title_suffix: "Contenu en Français",
    notice: "⚠️ Contenu en cours de chargement",
    message: "Le système tente de charger le contenu depuis les fichiers Markdown d'Astro.",
    description: "Cette fable fait partie de la collection d'Antoine Vincent Arnault, poète et fabuliste français du XVIIIe siècle.",
    technical: "Information technique",
    file_label: "Fichier recherché",
};

const EN: Translation = Translation {
    title_suffix: "Content in English",
    notice: "⚠️ Content loading in progress",
    message: "The system is attempting to load content from Astro Markdown files.",
    description: "This fable is part of the collection by Antoine Vincent Arnault, French poet and fabulist of the 18th century.",
    technical: "Technical information",
    file_label: "File searched",
};

const ES: Translation = Translation {
    title_suffix: "Contenido en Español",
    notice: "⚠️ Contenido cargándose",
    message: "El sistema está intentando cargar el contenido desde los archivos Markdown de Astro.",
    description: "Esta fábula forma parte de la colección de Antoine Vincent Arnault, poeta y fabulista francés del siglo XVIII.",
    technical: "Información técnica",
    file_label: "Archivo buscado",
};

impl Translation {
    /// Table for `language`; French when there is none.
    fn for_language(language: Language) -> &'static Translation {
        match language {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Fr | Language::De | Language::It => &FR,
        }
    }
}

/// Generates placeholder HTML shown when a document cannot be resolved.
///
/// Output depends only on its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackContentGenerator;

impl FallbackContentGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Placeholder page for `fable` in `language`.
    #[must_use]
    pub fn generate(&self, language: Language, fable: &str) -> String {
        let t = Translation::for_language(language);
        let title = escape_html(&fable_display_title(fable));
        let file = escape_html(&format!("{fable}.md"));

        format!(
            r#"<div class="content-container">
  <h1 class="text-2xl font-bold text-slate-800 mb-6">{title} - {suffix}</h1>
  <div class="bg-amber-50 border border-amber-200 rounded-lg p-4 mb-6">
    <p class="text-amber-800 font-medium mb-2">{notice}</p>
    <p class="text-sm text-amber-700">{message}</p>
  </div>
  <div class="space-y-4">
    <p class="text-slate-600 leading-relaxed">{description}</p>
    <div class="bg-blue-50 border border-blue-200 rounded-lg p-4">
      <h3 class="font-semibold text-blue-800 mb-2">{technical}</h3>
      <p class="text-sm text-blue-700">{file_label}: {file}</p>
    </div>
  </div>
</div>
"#,
            suffix = t.title_suffix,
            notice = t.notice,
            message = t.message,
            description = t.description,
            technical = t.technical,
            file_label = t.file_label,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_fable_title() {
        assert_eq!(format_fable_title("le-renard"), "Le Renard");
        assert_eq!(format_fable_title("ecole"), "Ecole");
        assert_eq!(format_fable_title("été-long"), "Été Long");
        assert_eq!(format_fable_title("a--b"), "A  B");
        assert_eq!(format_fable_title(""), "");
    }

    #[test]
    fn test_known_titles() {
        assert_eq!(fable_display_title("acteon"), "Actéon");
        assert_eq!(
            fable_display_title("laigle-et-le-chapon"),
            "L'Aigle et le Chapon"
        );
        assert_eq!(fable_display_title("le-chene"), "Le Chene");
    }

    #[test]
    fn test_french_placeholder() {
        let html = FallbackContentGenerator::new().generate(Language::Fr, "acteon");

        assert!(html.contains("Actéon - Contenu en Français"));
        assert!(html.contains("Fichier recherché: acteon.md"));
        assert!(html.starts_with(r#"<div class="content-container">"#));
    }

    #[test]
    fn test_english_and_spanish_placeholders() {
        let generator = FallbackContentGenerator::new();

        let en = generator.generate(Language::En, "le-renard");
        assert!(en.contains("Le Renard - Content in English"));
        assert!(en.contains("File searched: le-renard.md"));

        let es = generator.generate(Language::Es, "acteon");
        assert!(es.contains("Actéon - Contenido en Español"));
        assert!(es.contains("Archivo buscado: acteon.md"));
    }

    #[test]
    fn test_untranslated_language_uses_french() {
        let generator = FallbackContentGenerator::new();
        assert_eq!(
            generator.generate(Language::De, "acteon"),
            generator.generate(Language::Fr, "acteon")
        );
        assert!(
            generator
                .generate(Language::It, "acteon")
                .contains("Contenu en Français")
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = FallbackContentGenerator::new();
        assert_eq!(
            generator.generate(Language::En, "laigle-et-le-chapon"),
            generator.generate(Language::En, "laigle-et-le-chapon")
        );
    }

    #[test]
    fn test_fable_id_is_escaped() {
        let html = FallbackContentGenerator::new().generate(Language::Fr, "<b>x</b>");
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;.md"));
    }
}
