use clap::{App, Arg};
use log::{debug, info};
use validator_bls::{
    derive_bls_private_key, private_to_public, sign_pop, verify_pop, PublicKeyCache,
    PRIVATEKEYBYTES,
};

fn main() {
    env_logger::init();

    let matches = App::new("DeriveKey")
        .about("Derives the BLS key of a validator from its ECDSA private key")
        .arg(
            Arg::with_name("key")
                .short("k")
                .value_name("KEY")
                .help("Sets the hex encoded ECDSA private key")
                .required(true),
        )
        .arg(
            Arg::with_name("address")
                .short("a")
                .value_name("ADDRESS")
                .help("Sets the hex encoded address to produce a proof of possession for"),
        )
        .get_matches();

    let key_hex = matches.value_of("key").unwrap();
    let key_bytes = hex::decode(key_hex.trim_start_matches("0x")).expect("key must be hex");
    assert_eq!(key_bytes.len(), PRIVATEKEYBYTES, "key must be 32 bytes");
    let mut ecdsa_key = [0u8; PRIVATEKEYBYTES];
    ecdsa_key.copy_from_slice(&key_bytes);

    let private_key = derive_bls_private_key(&ecdsa_key).unwrap();
    debug!("derived private key");
    let public_key = private_to_public(&private_key).unwrap();
    println!("private key: 0x{}", hex::encode(&private_key));
    println!("public key: {}", public_key);

    if let Some(address) = matches.value_of("address") {
        let address = hex::decode(address.trim_start_matches("0x")).expect("address must be hex");
        let pop = sign_pop(&private_key, &address).unwrap();
        verify_pop(&PublicKeyCache::new(), &public_key, &address, &pop).unwrap();
        info!("proof of possession verified successfully");
        println!("proof of possession: {}", pop);
    }
}
