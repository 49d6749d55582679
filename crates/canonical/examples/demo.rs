use canonical::{analyze, tokenize, AnalyzerConfig};

fn main() {
    let text = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let text = if text.trim().is_empty() {
        "2 Tomatoes (chopped), 1 red ONION, olive-oil & a pinch of salt".to_string()
    } else {
        text
    };

    let cfg = AnalyzerConfig::default().with_stop_words(["of"]);

    println!("input:  {text}");
    println!("tokens: {:?}", tokenize(&text));
    match analyze(&text, &cfg) {
        Ok(terms) => println!("terms:  {terms:?}"),
        Err(err) => eprintln!("analysis failed: {err}"),
    }
}
