/// Splits textarea input into an ordered list of trimmed, non-blank lines.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Derives a URL slug from a title: Spanish accents folded to ASCII, runs
/// of anything non-alphanumeric collapsed to a single hyphen.
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_trims_and_drops_blanks() {
        let raw = "Bake artisan bread\n\n  Supervise quality  \n\t\nTrain helpers";
        assert_eq!(
            split_lines(raw),
            vec!["Bake artisan bread", "Supervise quality", "Train helpers"]
        );
        assert!(split_lines("\n \n").is_empty());
    }

    #[test]
    fn slugify_folds_accents_and_collapses_separators() {
        assert_eq!(slugify("Maestro Panadero"), "maestro-panadero");
        assert_eq!(slugify("Cajero/a de Sucursal"), "cajero-a-de-sucursal");
        assert_eq!(slugify("Producción & Diseño"), "produccion-diseno");
        assert_eq!(slugify("  --Señor Developer--  "), "senor-developer");
    }
}
