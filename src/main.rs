use clap::Parser;
use dialoguer::{Input, Select};
use std::process;
use tvbrowse::{
    Browser, BrowserEvent, CatalogProvider, Effect, Scope, TvMazeCatalog, View,
    episode_option_label,
};

/// Browse and search a TVMaze-backed show and episode catalog.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the catalog API
    #[arg(long, default_value = "https://api.tvmaze.com")]
    base_url: String,
}

/// What the user picked from the current menu.
enum MenuChoice {
    /// Feed this event to the browser
    Event(BrowserEvent),
    /// Open the search prompt
    Search,
    /// End the session
    Quit,
}

fn main() {
    let args = Args::parse();

    let catalog = TvMazeCatalog::with_base_url(&args.base_url);

    let shows = match catalog.list_shows() {
        Ok(shows) => shows,
        Err(e) => {
            eprintln!("Failed to load shows: {}", e);
            process::exit(1);
        }
    };

    let mut browser = Browser::new();
    let effects = browser.seed(shows);
    run_effects(&catalog, &mut browser, effects);

    loop {
        match prompt(&browser) {
            MenuChoice::Quit => break,
            MenuChoice::Search => {
                let Ok(term) = Input::<String>::new()
                    .with_prompt("Search")
                    .allow_empty(true)
                    .interact_text()
                else {
                    break;
                };

                let effects = browser.handle(BrowserEvent::SearchChanged(term));
                run_effects(&catalog, &mut browser, effects);
            }
            MenuChoice::Event(event) => {
                let effects = browser.handle(event);
                run_effects(&catalog, &mut browser, effects);
            }
        }
    }
}

/// Carries out the effects the browser asked for.
///
/// Draw effects are printed; fetch effects run the blocking episode
/// request and feed the outcome back into the browser, which may answer
/// with further effects.
fn run_effects(catalog: &impl CatalogProvider, browser: &mut Browser, effects: Vec<Effect>) {
    let mut queue = effects;

    while !queue.is_empty() {
        let mut followups = Vec::new();

        for effect in queue {
            match effect {
                Effect::Draw(view) => print_view(&view),
                Effect::FetchEpisodes { show_id } => {
                    let event = match catalog.list_episodes(show_id) {
                        Ok(episodes) => BrowserEvent::EpisodesLoaded { show_id, episodes },
                        Err(error) => BrowserEvent::EpisodesFailed { show_id, error },
                    };
                    followups.extend(browser.handle(event));
                }
            }
        }

        queue = followups;
    }
}

/// Prints a view to stdout: notice or cards, readout and footer.
fn print_view(view: &View) {
    println!();

    match &view.notice {
        Some(notice) => println!("{}", notice),
        None => {
            for card in &view.cards {
                println!("{}", card.title);
                if let Some(image) = &card.image {
                    println!("  Image: {}", image);
                }
                if !card.summary.is_empty() {
                    println!("  {}", card.summary);
                }
                println!();
            }
            println!("Showing {}", view.readout);
        }
    }

    println!("{}", view.footer);
}

/// Shows the menu for the current scope and maps the pick to a choice.
///
/// The selection prompts stand in for the page's two dropdowns, the
/// search entry for its text input.
fn prompt(browser: &Browser) -> MenuChoice {
    match browser.scope() {
        Scope::BrowsingShows => prompt_shows(browser),
        // Blocking fetches resolve inside run_effects, so the session is
        // never still loading by the time we prompt again.
        Scope::LoadingEpisodes { .. } => prompt_shows(browser),
        Scope::BrowsingEpisodes { show_id } => prompt_episodes(browser, show_id),
        Scope::SingleEpisode { .. } => prompt_single_episode(),
    }
}

fn prompt_shows(browser: &Browser) -> MenuChoice {
    let shows = browser.store().shows();

    let mut items = vec!["Search...".to_string()];
    items.extend(shows.iter().map(|show| show.name.clone()));
    items.push("Quit".to_string());

    let Ok(index) = Select::new()
        .with_prompt("Pick a show")
        .items(&items)
        .default(0)
        .interact()
    else {
        return MenuChoice::Quit;
    };

    if index == 0 {
        MenuChoice::Search
    } else if index == items.len() - 1 {
        MenuChoice::Quit
    } else {
        MenuChoice::Event(BrowserEvent::ShowSelected(shows[index - 1].id))
    }
}

fn prompt_episodes(browser: &Browser, show_id: usize) -> MenuChoice {
    let episodes = browser.store().episodes(show_id).unwrap_or(&[]);

    let mut items = vec!["Search...".to_string(), "All shows".to_string()];
    items.extend(episodes.iter().map(episode_option_label));
    items.push("Quit".to_string());

    let Ok(index) = Select::new()
        .with_prompt("Pick an episode")
        .items(&items)
        .default(0)
        .interact()
    else {
        return MenuChoice::Quit;
    };

    match index {
        0 => MenuChoice::Search,
        1 => MenuChoice::Event(BrowserEvent::AllShowsSelected),
        i if i == items.len() - 1 => MenuChoice::Quit,
        i => MenuChoice::Event(BrowserEvent::EpisodeSelected(episodes[i - 2].id)),
    }
}

fn prompt_single_episode() -> MenuChoice {
    let items = ["All episodes", "All shows", "Quit"];

    let Ok(index) = Select::new()
        .with_prompt("Continue")
        .items(&items)
        .default(0)
        .interact()
    else {
        return MenuChoice::Quit;
    };

    match index {
        0 => MenuChoice::Event(BrowserEvent::AllEpisodesSelected),
        1 => MenuChoice::Event(BrowserEvent::AllShowsSelected),
        _ => MenuChoice::Quit,
    }
}
