// src/bin/poker_client_cli.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use poker_client::api::SessionClient;
use poker_client::bot::BotAi;
use poker_client::domain::{Chips, HandSummary, PlayerIdentity};
use poker_client::engine::{
    ActionRequest, EngineError, HandStatus, OfflineGameManager, PlayerAction, RandomSource,
};
use poker_client::eval::describe_hand;
use poker_client::infra::{init_cli_logger, ClientConfig, DeterministicRng, SystemRng};
use poker_client::manifest::{lint, BuildManifest, Severity};

#[derive(Debug, Parser)]
#[command(name = "poker_client_cli", version, about = "Офлайн-покер с ботами и клиент сервера аккаунтов")]
struct Cli {
    /// Путь к poker_client.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Логи в JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Сыграть офлайн несколько раздач
    Play {
        #[arg(long, default_value_t = 10)]
        hands: u32,
        /// Seed для воспроизводимых раздач
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        bots: Option<usize>,
        /// Ходы живого игрока вводятся с клавиатуры (иначе за него играет бот)
        #[arg(short, long)]
        interactive: bool,
        #[arg(long)]
        name: Option<String>,
    },
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
        email: String,
    },
    /// Войти и добавить друга по коду
    AddFriend {
        username: String,
        password: String,
        friend_code: String,
    },
    /// Проверить манифест сборки (по умолчанию встроенный)
    LintManifest {
        path: Option<PathBuf>,
    },
}

impl Command {
    /// Имя для логов: аргументы не пишем, среди них пароли.
    fn name(&self) -> &'static str {
        match self {
            Command::Play { .. } => "play",
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::AddFriend { .. } => "add-friend",
            Command::LintManifest { .. } => "lint-manifest",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("не удалось загрузить конфиг {}", path.display()))?,
        None => ClientConfig::default(),
    };

    init_cli_logger(
        cli.verbose,
        cli.json_logs || config.logging.json,
        &config.logging.level,
    );
    info!(command = cli.command.name(), "poker_client_cli запущен");

    match cli.command {
        Command::Play {
            hands,
            seed,
            bots,
            interactive,
            name,
        } => {
            let mut config = config;
            if let Some(bots) = bots {
                config.game.bots = bots;
            }
            let identity = PlayerIdentity {
                username: name,
                user_id: None,
            };
            match seed {
                Some(seed) => play(&config, &identity, hands, interactive, &mut DeterministicRng::from_seed(seed)),
                None => play(&config, &identity, hands, interactive, &mut SystemRng),
            }
        }
        Command::Login { username, password } => {
            let mut client = SessionClient::new(&config.server.base_url, config.server.timeout())?;
            let profile = client.login(&username, &password).await?;
            println!(
                "Вход выполнен: {} (id {}), код друга {}",
                profile.username, profile.user_id, profile.friend_code
            );
            Ok(())
        }
        Command::Register {
            username,
            password,
            email,
        } => {
            let client = SessionClient::new(&config.server.base_url, config.server.timeout())?;
            let message = client.register(&username, &password, &email).await?;
            println!("{message}");
            Ok(())
        }
        Command::AddFriend {
            username,
            password,
            friend_code,
        } => {
            let mut client = SessionClient::new(&config.server.base_url, config.server.timeout())?;
            client.login(&username, &password).await?;
            let message = client.add_friend(&friend_code).await?;
            println!("{message}");
            Ok(())
        }
        Command::LintManifest { path } => lint_manifest(path),
    }
}

fn play<R: RandomSource>(
    config: &ClientConfig,
    identity: &PlayerIdentity,
    hands: u32,
    interactive: bool,
    rng: &mut R,
) -> anyhow::Result<()> {
    let mut manager = OfflineGameManager::initialize_game(&config.game.to_settings(), identity);
    let bot = BotAi::new(config.bot);

    for _ in 0..hands {
        let mut request = match manager.start_new_hand(rng) {
            Ok(request) => request,
            Err(EngineError::NotEnoughPlayers) => {
                println!("За столом меньше двух игроков с фишками, игра окончена.");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        loop {
            let seat = request.seat;
            let is_bot = manager.table().seat(seat).map(|p| p.is_bot).unwrap_or(true);

            let (action, amount) = if interactive && !is_bot {
                prompt_action(&manager, &request)?
            } else {
                bot.best_action(manager.table(), seat, &request, rng)
            };

            let status = match manager.process_seat_action(seat, action, amount) {
                Ok(status) => status,
                Err(e) => {
                    warn!(seat, %action, amount = amount.0, error = %e, "действие отклонено, пробуем пассивный ход");
                    if is_bot || !interactive {
                        let fallback = if request.allows(PlayerAction::Check) {
                            PlayerAction::Check
                        } else {
                            PlayerAction::Fold
                        };
                        manager.process_seat_action(seat, fallback, Chips::ZERO)?
                    } else {
                        println!("Ошибка: {e}");
                        HandStatus::Ongoing(manager.request_player_action(seat))
                    }
                }
            };

            match status {
                HandStatus::Ongoing(next) => request = next,
                HandStatus::Finished(summary, _) => {
                    print_summary(&summary);
                    break;
                }
            }
        }
    }

    println!();
    println!("Итоговые стеки:");
    for p in &manager.table().seats {
        println!("  [{}] {:<10} {}", p.seat_index, p.player_name, p.stack);
    }
    Ok(())
}

fn prompt_action(manager: &OfflineGameManager, request: &ActionRequest) -> anyhow::Result<(PlayerAction, Chips)> {
    let table = manager.table();
    if let Some(me) = table.seat(request.seat) {
        let hole: Vec<String> = me.hole_cards.iter().map(|c| c.to_string()).collect();
        let board: Vec<String> = table.community_cards.iter().map(|c| c.to_string()).collect();
        println!();
        println!(
            "{:?} | банк {} | борд [{}] | ваши карты [{}]",
            table.stage,
            table.pot,
            board.join(" "),
            hole.join(" ")
        );
        println!(
            "к уравниванию {} (ваша ставка {}), мин. рейз {}, стек {}",
            request.bet_to_call, me.current_bet, request.min_raise, request.stack
        );
    }
    let allowed: Vec<String> = request.allowed_actions.iter().map(|a| a.to_string()).collect();
    println!("доступно: {}", allowed.join(", "));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("ввод закрыт");
        }
        match parse_action(line.trim()) {
            Some((action, amount)) if request.allows(action) => return Ok((action, amount)),
            Some((action, _)) => println!("Действие {action} сейчас недоступно"),
            None => println!("Формат: fold | check | call | bet N | raise N | allin | post"),
        }
    }
}

fn parse_action(input: &str) -> Option<(PlayerAction, Chips)> {
    let mut parts = input.split_whitespace();
    let action = match parts.next()?.to_ascii_lowercase().as_str() {
        "fold" | "f" => PlayerAction::Fold,
        "check" | "x" => PlayerAction::Check,
        "call" | "c" => PlayerAction::Call,
        "bet" | "b" => PlayerAction::Bet,
        "raise" | "r" => PlayerAction::Raise,
        "allin" | "all-in" | "a" => PlayerAction::AllIn,
        "post" | "p" => PlayerAction::PostBlind,
        _ => return None,
    };
    let amount = match action {
        PlayerAction::Bet | PlayerAction::Raise => Chips(parts.next()?.parse().ok()?),
        _ => Chips::ZERO,
    };
    Some((action, amount))
}

fn print_summary(summary: &HandSummary) {
    let board: Vec<String> = summary.board.iter().map(|c| c.to_string()).collect();
    println!();
    println!(
        "=== Раздача #{} | {:?} | банк {} | борд [{}] ===",
        summary.hand_id,
        summary.stage_reached,
        summary.total_pot,
        board.join(" ")
    );
    for p in &summary.players {
        let hand = p
            .hand_result
            .as_ref()
            .map(describe_hand)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {:<10} {:<28} выиграл {:>6} итог {:+}",
            p.seat_index, p.player_name, hand, p.amount_won, p.net_result
        );
    }
}

fn lint_manifest(path: Option<PathBuf>) -> anyhow::Result<()> {
    let manifest = match &path {
        Some(path) => BuildManifest::from_file(path)
            .with_context(|| format!("не удалось прочитать манифест {}", path.display()))?,
        None => BuildManifest::bundled()?,
    };

    let report = lint(&manifest);
    if report.is_clean() {
        println!("Манифест в порядке: целей {}, модулей {}", manifest.targets.len(), manifest.modules.len());
        return Ok(());
    }

    for finding in &report.findings {
        let tag = match finding.severity() {
            Severity::Warning => "предупреждение",
            Severity::Error => "ошибка",
        };
        println!("{tag}: {finding}");
    }

    if report.has_errors() {
        bail!("в манифесте есть ошибки: {}", report.errors().count());
    }
    Ok(())
}
