#[macro_use] extern crate clap;

use clap::{App, ArgMatches};
use env_logger::{from_env, Env};
use std::{path::Path, process, time::Duration};
use url::Url;
use v1reg::{
    errors::RegistryError, runscript::create_runscript, Client, ImageId, Layer, RepositoryRef,
    Tag, TagLookup, Token,
};

#[tokio::main]
async fn main() {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .get_matches();

    let log_level = matches.value_of("log_level").unwrap();
    from_env(Env::default().default_filter_or(log_level)).init();

    match run(&matches).await {
        Ok(code) => process::exit(code),
        Err(err) => {
            if let RegistryError::TagNotFound { valid_tags, .. } = &err {
                println!("{}", valid_tags.join("\n"));
            }
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

async fn run(matches: &ArgMatches<'_>) -> Result<i32, RegistryError> {
    let client = build_client(matches)?;
    match matches.subcommand() {
        ("images", Some(sub)) => {
            let repo = repository(sub)?;
            match client.list_images(&repo).await? {
                None => {
                    eprintln!("Error retrieving images for repo {}", repo);
                    Ok(1)
                }
                Some(images) => {
                    for image in images {
                        match &image.id {
                            Some(id) => println!("{}", id),
                            None => println!("{}", serde_json::to_string(&image.extra)?),
                        }
                    }
                    Ok(0)
                }
            }
        }
        ("tags", Some(sub)) => {
            let repo = repository(sub)?;
            let tag = match sub.value_of("tag") {
                Some(tag) => Some(tag.parse::<Tag>()?),
                None => None,
            };
            match client.get_tags(&repo, tag.as_ref().map(Tag::as_str)).await? {
                TagLookup::All(tags) => {
                    for entry in tags {
                        println!("{} {}", entry.name, entry.layer().unwrap_or("-"));
                    }
                }
                TagLookup::Tagged(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            }
            Ok(0)
        }
        ("token", Some(sub)) => {
            let repo = repository(sub)?;
            match client.get_token(&repo, !sub.is_present("raw")).await? {
                None => {
                    eprintln!("No token issued for repo {}", repo);
                    Ok(1)
                }
                Some(token) => {
                    println!("{}", token);
                    Ok(0)
                }
            }
        }
        ("manifest", Some(sub)) => {
            let image_id: ImageId = sub.value_of("image_id").unwrap().parse()?;
            let token = match token(&client, sub).await? {
                Some(token) => token,
                None => return Ok(1),
            };
            match client.get_manifest(image_id.as_str(), &token).await? {
                None => {
                    eprintln!("Error retrieving manifest for {}", image_id);
                    Ok(1)
                }
                Some(manifest) => {
                    println!("{}", serde_json::to_string_pretty(manifest.as_value())?);
                    Ok(0)
                }
            }
        }
        ("layer", Some(sub)) => {
            let image_id: ImageId = sub.value_of("image_id").unwrap().parse()?;
            let folder = Path::new(sub.value_of("download_folder").unwrap());
            let token = match token(&client, sub).await? {
                Some(token) => token,
                None => return Ok(1),
            };
            match client
                .get_layer(image_id.as_str(), &token, Some(folder))
                .await?
            {
                Layer::Saved(path) => {
                    println!("{}", path.display());
                    Ok(0)
                }
                Layer::Response(response) => {
                    eprintln!(
                        "Error downloading layer {}, server returned {}",
                        image_id, response.status
                    );
                    Ok(1)
                }
            }
        }
        ("runscript", Some(sub)) => {
            let base_dir = sub.value_of("base_dir").unwrap();
            let cmd = string_values(sub, "command").join(" ");
            let path = create_runscript(&cmd, base_dir).await?;
            println!("{}", path.display());
            Ok(0)
        }
        _ => unreachable!(),
    }
}

fn build_client(matches: &ArgMatches) -> Result<Client, RegistryError> {
    let mut client = Client::builder();
    if let Some(url) = matches.value_of("index_url") {
        client = client.index_server(&Url::parse(url)?);
    }
    if let Some(url) = matches.value_of("images_url") {
        client = client.image_server(&Url::parse(url)?);
    }
    if matches.is_present("timeout") {
        let seconds = value_t!(matches, "timeout", u64).unwrap_or_else(|e| e.exit());
        client = client.request_timeout(Duration::from_secs(seconds));
    }
    if matches.is_present("no_proxy") {
        client = client.no_proxy();
    }
    client.build()
}

fn repository(matches: &ArgMatches) -> Result<RepositoryRef, RegistryError> {
    matches.value_of("repository").unwrap().parse()
}

/// Use the token given on the command line, or ask the index for one
async fn token(client: &Client, matches: &ArgMatches<'_>) -> Result<Option<Token>, RegistryError> {
    if let Some(token) = matches.value_of("token") {
        return Ok(Some(Token::from(token)));
    }
    let repo = repository(matches)?;
    let token = client.get_token(&repo, true).await?;
    if token.is_none() {
        eprintln!("No token issued for repo {}", repo);
    }
    Ok(token)
}

fn string_values<S: AsRef<str>>(matches: &ArgMatches, name: S) -> Vec<String> {
    matches
        .values_of(name)
        .into_iter()
        .map(|values| values.map(|value| value.to_string()))
        .flatten()
        .collect()
}
