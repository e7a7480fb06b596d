use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ChatRequest, Dispatcher, Status};
use crate::core::AppConfig;

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let config = AppConfig::default();
    let dispatcher = Dispatcher::from_config(&config)?;

    let mode = if dispatcher.providers().is_empty() {
        "offline only".to_string()
    } else {
        format!("{} provider(s)", dispatcher.providers().len())
    };
    println!("{} [{}]", dispatcher.display_name(), mode);
    println!("{}", dispatcher.greeting());

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let message: String = line.chars().take(config.max_message_length).collect();
                let request = ChatRequest::new(&message);
                let reply = dispatcher.dispatch(&request).await?;
                let marker = match reply.status {
                    Status::Online => "online",
                    Status::Offline => "offline",
                };
                println!("[{} / {}]\n{}\n", reply.provider, marker, reply.response);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
