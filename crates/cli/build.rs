use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("traducto")
        .version("0.3.0")
        .author("Traducto Contributors")
        .about("Prepare web pages for localization")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(
            clap::Command::new("prepare")
                .about("Extract fragments and build the placeholder template")
                .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
                .arg(
                    clap::arg!(-o --output <DIR> "Output directory (default: derived from the document title)")
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(clap::arg!(--from <LANG> "Source language of the document").default_value("EN"))
                .arg(
                    clap::arg!(--to <LANGS> "Comma-separated target languages")
                        .value_delimiter(',')
                        .default_value("FR,NL"),
                )
                .arg(
                    clap::arg!(--layout <FILE> "Layout file with a {{ content }} slot")
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
                .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA")),
        )
        .subcommand(
            clap::Command::new("translate")
                .about("Fill the translation matrix by calling a provider per cell")
                .arg(
                    clap::arg!(<DIR> "Directory produced by `prepare`")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    clap::arg!(--provider <PROVIDER> "Translation provider")
                        .default_value("pseudo")
                        .value_parser(["pseudo", "deepl"]),
                ),
        )
        .subcommand(
            clap::Command::new("render")
                .about("Render one HTML document per target language")
                .arg(
                    clap::arg!(<DIR> "Directory holding template.html and matrix.json")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            clap::Command::new("completions")
                .about("Generate a shell completion script on stdout")
                .arg(
                    clap::arg!(<SHELL> "Shell to generate for")
                        .value_parser(["bash", "zsh", "fish", "powershell"]),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "traducto", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "traducto", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "traducto", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "traducto", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
