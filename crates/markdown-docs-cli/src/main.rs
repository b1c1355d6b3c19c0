use std::process;

fn main() {
    match markdown_docs_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("markdown-docs error: {err}");
            process::exit(1);
        }
    }
}
