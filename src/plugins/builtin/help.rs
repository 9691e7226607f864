use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::infrastructure::plugins::PluginRegistry;
use crate::plugins::{CommandBody, ExecutionContext, HandlerResult};

/// Lists the loaded commands, or describes the one named in the first argument
pub struct Help;

impl Help {
    pub fn render(registry: &PluginRegistry, topic: Option<&str>) -> String {
        if let Some(topic) = topic {
            return match registry.commands().get(&topic.to_lowercase()) {
                Some(cmd) => {
                    let mut help = format!("{} - {}", cmd.name, cmd.description.as_deref().unwrap_or("No description"));
                    let aliases: Vec<&str> = cmd.literal_aliases().collect();
                    if !aliases.is_empty() {
                        help.push_str(&format!("\nAliases: {}", aliases.join(", ")));
                    }
                    if cmd.is_no_prefix() {
                        help.push_str("\nWorks without a prefix");
                    }
                    help
                }
                None => format!("Unknown command: {}", topic),
            };
        }

        let mut help = "Available commands:\n".to_string();
        // Alias keys share the descriptor; list each command under its own name only
        for (key, cmd) in registry.commands().iter().filter(|(key, cmd)| *key == cmd.name) {
            help.push_str(&format!("  {} - {}\n", key, cmd.description.as_deref().unwrap_or("")));
        }
        help
    }
}

#[async_trait]
impl CommandBody for Help {
    async fn exec(&self, message: &Message, ctx: ExecutionContext) -> HandlerResult {
        if ctx.args.len() > 1 {
            ctx.conn.send_text(&message.chat_id, "Usage: help [command]").await?;
            return Ok(());
        }
        let topic = Some(ctx.text.trim()).filter(|t| !t.is_empty());
        let text = Self::render(&ctx.registry, topic);
        ctx.conn.send_text(&message.chat_id, text.trim_end()).await?;
        Ok(())
    }
}
