use blogstitch::build::build_site;
use blogstitch::config::Config;
use clap::{App, Arg};
use std::path::Path;

fn main() {
    let matches = App::new("blogstitch")
        .version(clap::crate_version!())
        .about("Stitches a directory of Markdown posts into a single HTML page")
        .arg(
            Arg::with_name("root")
                .help("Project root directory (defaults to the current directory)")
                .index(1),
        )
        .arg(
            Arg::with_name("posts")
                .short("p")
                .long("posts")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory of Markdown post sources"),
        )
        .arg(
            Arg::with_name("template")
                .short("t")
                .long("template")
                .takes_value(true)
                .value_name("FILE")
                .help("HTML template to merge the generated feed into"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .help("Output HTML file (overwritten in full)"),
        )
        .get_matches();

    println!("Running blogstitch");

    let root = Path::new(matches.value_of("root").unwrap_or("."));
    let mut config = match Config::from_directory(root) {
        Ok(config) => config,
        Err(e) => fatal(&e.to_string()),
    };
    if let Some(posts) = matches.value_of("posts") {
        config.posts_directory = root.join(posts);
    }
    if let Some(template) = matches.value_of("template") {
        config.template_path = root.join(template);
    }
    if let Some(output) = matches.value_of("output") {
        config.output_path = root.join(output);
    }

    if let Err(e) = build_site(&config) {
        fatal(&e.to_string());
    }
}

fn fatal(message: &str) -> ! {
    eprintln!("ERROR: {}", message);
    std::process::exit(1);
}
