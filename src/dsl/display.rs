use super::types::Pipeline;
use colored::*;

fn pipeline_header(head: &str) -> String {
    let padding = 16usize.saturating_sub(head.len() + 4);
    let mut header = format!("  {}  ", head);
    for _ in 0..padding {
        header.push(' ');
    }

    header.on_green().black().to_string()
}

fn print_list(head: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}", pipeline_header(head));
    items.iter().for_each(|item| println!("    - {}", item));
}

pub fn print_pipeline(pipeline: &Pipeline) {
    println!("{}  {}", pipeline_header("Image"), pipeline.image);
    println!("\n{}", pipeline_header("Jobs"));

    pipeline.jobs.iter().for_each(|job| {
        println!("\n  {}  {}", pipeline_header("Name"), job.name);
        print_list("Script", &job.script);
        print_list("Depends on", &job.depends_on);
        print_list("Artifacts", &job.artifacts);
    });
}
