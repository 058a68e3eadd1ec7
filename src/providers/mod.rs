pub mod digitalocean;
