/// Fixed instructions placed in front of every prompt
pub const INSTRUCTIONS: &str = "\
Jsi PropBot, asistent realitní kanceláře. Odpovídáš na dotazy klientů \
o nemovitostech, které kancelář právě nabízí.

PRAVIDLA:
- Odpovídej vždy česky, i když se klient ptá v jiném jazyce.
- Vycházej pouze z databáze nemovitostí níže. Nic si nevymýšlej.
- Pokud žádná nemovitost dotazu neodpovídá, řekni to a nabídni nejbližší alternativu.
- U každé doporučené nemovitosti uveď její číslo, název, lokalitu a cenu.
- Buď stručný a zdvořilý, nanejvýš několik vět nebo krátký seznam.

PŘÍKLADY ODPOVĚDÍ:
Klient: Máte nějaký byt v Praze do 5 milionů?
PropBot: Ano, nabízíme NEMOVITOST #12 – Byt 2+kk na Vinohradech, Praha, za 4 890 000 Kč.
Klient: Hledám dům se zahradou.
PropBot: Doporučuji NEMOVITOST #7 – Vila u lesa v Brně za 12 500 000 Kč, má garáž i zahradu.
Klient: Máte něco na Slovensku?
PropBot: Bohužel v tuto chvíli nemáme žádnou nemovitost na Slovensku.";

/// Label that introduces the client's question
pub const QUERY_LABEL: &str = "DOTAZ KLIENTA:";

/// Assemble the outbound prompt: instructions, snapshot, then the raw query.
/// The query is passed through untouched, even when empty.
pub fn build_prompt(snapshot: &str, user_query: &str) -> String {
    let mut prompt =
        String::with_capacity(INSTRUCTIONS.len() + snapshot.len() + user_query.len() + 32);
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(snapshot);
    prompt.push_str(QUERY_LABEL);
    prompt.push(' ');
    prompt.push_str(user_query);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::format_for_prompt;

    #[test]
    fn sections_appear_in_order() {
        let snapshot = format_for_prompt(&[]);
        let prompt = build_prompt(&snapshot, "Máte byt v Brně?");

        let instructions = prompt.find("Jsi PropBot").unwrap();
        let header = prompt.find("=== DATABÁZE NEMOVITOSTÍ ===").unwrap();
        let query = prompt.find("DOTAZ KLIENTA: Máte byt v Brně?").unwrap();
        assert!(instructions < header);
        assert!(header < query);
        assert!(prompt.ends_with("Máte byt v Brně?"));
    }

    #[test]
    fn snapshot_is_embedded_verbatim() {
        let snapshot = "=== DATABÁZE NEMOVITOSTÍ ===\n\nNEMOVITOST #1:\n- Název: X\n\n";
        let prompt = build_prompt(snapshot, "q");
        assert!(prompt.contains(snapshot));
    }

    #[test]
    fn empty_query_passes_through() {
        let prompt = build_prompt("S\n", "");
        assert!(prompt.ends_with("S\nDOTAZ KLIENTA: "));
    }

    #[test]
    fn query_is_not_escaped_or_trimmed() {
        let query = "  \"cena\" <5M> \n";
        assert!(build_prompt("", query).ends_with(query));
    }
}
