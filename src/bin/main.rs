use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use wordgraph_core::core::{Descendant, Relations, WordSummary};
use wordgraph_core::{ServiceConfig, WordGraphError, WordService};

const HELP: &str = "\
Commands:
  add <word> <translation...>   insert a word
  rel <word>                    parents and children
  chain <word>                  prefix chain from the roots
  desc <word>                   everything derived from a word
  show <word>                   word as JSON with parents and children
  tree                          whole graph as JSON
  outline                       whole graph as an indented list
  load <file.json>              bulk-load a dictionary file
  save                          write the snapshot
  exit                          save and quit";

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env();
    let service = match WordService::start(config) {
        Ok(service) => service,
        Err(e) => {
            log::error!("start-up load failed: {}", e);
            WordService::from_snapshot_or_new(ServiceConfig::from_env())
        }
    };

    println!("{}", "Word Graph. Type 'help' for commands.".bold());
    println!("---------------------------------------------------------------");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("\n{} ", ">".cyan());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or("");
        let word = parts.next();

        match (command, word) {
            ("exit", _) => break,
            ("help", _) => println!("{}", HELP),
            ("add", Some(word)) => {
                let translation = parts.collect::<Vec<_>>().join(" ");
                report(service.insert_word(word, &translation, None, None).map(|_| {
                    println!("{} '{}'", "Added".green(), word);
                }));
            }
            ("rel", Some(word)) => report(service.relations(word).map(|rel| print_relations(&rel))),
            ("chain", Some(word)) => report(service.ancestor_chain(word).map(|chain| {
                print_summaries("Chain", &chain.chain);
                println!("  => {} - {}", chain.node.word.as_str().bold(), chain.node.translation);
            })),
            ("desc", Some(word)) => report(service.descendants(word).map(|d| print_descendants(&d))),
            ("show", Some(word)) => report(
                service
                    .serialize_node(word, true, true)
                    .and_then(|record| Ok(serde_json::to_string_pretty(&record)?))
                    .map(|json| println!("{}", json)),
            ),
            ("tree", _) => report(service.tree_json().map(|json| println!("{}", json))),
            ("outline", _) => print!("{}", service.outline()),
            ("load", Some(path)) => {
                report(service.load_dictionary_file(Path::new(path)).map(|r| {
                    println!("{} {} word(s), more loading in the background", "Loaded".green(), r.inserted);
                }));
            }
            ("save", _) => report(service.save_snapshot().map(|_| {
                println!("Saved to '{}'", service.config().snapshot_path.display());
            })),
            ("", _) => {}
            _ => println!("{}", "Unknown command. Type 'help'.".yellow()),
        }
    }

    println!("\nWaiting for background loading...");
    report(service.wait_for_background_load().map(|_| ()));
    println!("Saving snapshot...");
    report(service.save_snapshot());
    Ok(())
}

fn report(result: Result<(), WordGraphError>) {
    if let Err(e) = result {
        let label = match e {
            WordGraphError::NotFound(_) => "Not found",
            WordGraphError::DuplicateWord { .. } => "Conflict",
            WordGraphError::InvalidInput(_) => "Bad input",
            _ => "Error",
        };
        println!("{}: {}", label.red(), e);
    }
}

fn print_summaries(title: &str, items: &[WordSummary]) {
    println!("{}:", title.bold());
    if items.is_empty() {
        println!("    (none)");
    }
    for item in items {
        println!("    {} - {}", item.word, item.translation);
    }
}

fn print_relations(rel: &Relations) {
    println!("{} - {}", rel.word.word.as_str().bold(), rel.word.translation);
    print_summaries("Parents", &rel.parents);
    print_summaries("Children", &rel.children);
}

fn print_descendants(items: &[Descendant]) {
    if items.is_empty() {
        println!("    (none)");
    }
    for item in items {
        println!("{}{} - {}", "    ".repeat(item.level), item.word, item.translation);
    }
}
