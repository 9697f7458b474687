//! End-to-end tests: a registry deployed on a ledger, driven only through
//! submitted transactions, the way an external client would drive it.

use boxoffice_host::Ledger;
use boxoffice_types::*;
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

struct World {
    ledger: Ledger,
    deployer: Identity,
    buyer: Identity,
}

fn deploy() -> World {
    let deployer = Identity::from_label("deployer");
    let buyer = Identity::from_label("buyer");
    let mut ledger = Ledger::deploy(
        RegistryConfig::new("TokenMaster", "TM"),
        deployer,
        LedgerConfig::default(),
    )
    .unwrap();
    ledger.fund(buyer, dec(100)).unwrap();
    World {
        ledger,
        deployer,
        buyer,
    }
}

fn eth_texas() -> Call {
    Call::AddOccasion(OccasionListing {
        name: "ETH Texas".into(),
        cost: dec(1),
        max_seats: 100,
        date: "Apr 27".into(),
        time: "10:00AM CST".into(),
        location: "Austin, Texas".into(),
    })
}

fn mint(occasion: u64, seat: u32, value: Decimal) -> Call {
    Call::Mint {
        occasion_id: OccasionId(occasion),
        seat,
        value,
    }
}

#[test]
fn concrete_scenario() {
    let mut w = deploy();
    let reg = w.ledger.registry();
    assert_eq!(reg.name(), "TokenMaster");
    assert_eq!(reg.symbol(), "TM");
    assert_eq!(reg.custodian(), w.deployer);

    let added = w.ledger.execute(w.deployer, eth_texas()).unwrap();
    assert_eq!(added, Outcome::OccasionAdded(OccasionId(1)));
    assert_eq!(w.ledger.registry().total_occasions(), 1);

    let occasion = w.ledger.registry().get_occasion(OccasionId(1)).unwrap();
    assert_eq!(occasion.id, OccasionId(1));
    assert_eq!(occasion.name, "ETH Texas");
    assert_eq!(occasion.cost, dec(1));
    assert_eq!(occasion.remaining_seats, 100);
    assert_eq!(occasion.date, "Apr 27");
    assert_eq!(occasion.time, "10:00AM CST");
    assert_eq!(occasion.location, "Austin, Texas");

    w.ledger.execute(w.buyer, mint(1, 50, dec(1))).unwrap();
    let reg = w.ledger.registry();
    assert_eq!(reg.get_occasion(OccasionId(1)).unwrap().remaining_seats, 99);
    assert!(reg.has_bought(OccasionId(1), w.buyer));
    assert_eq!(reg.booked_seat(OccasionId(1), 50), Some(w.buyer));
    assert_eq!(reg.get_booked_seats(OccasionId(1)).unwrap(), &[50]);
    assert_eq!(reg.custodied_balance(), dec(1));
    assert_eq!(reg.total_supply(), 1);
    assert_eq!(reg.owner_of(TicketId(1)).unwrap(), w.buyer);

    let before = w.ledger.balance(w.deployer);
    let withdrawn = w.ledger.execute(w.deployer, Call::Withdraw).unwrap();
    assert_eq!(withdrawn, Outcome::Withdrawn(dec(1)));
    assert_eq!(w.ledger.balance(w.deployer), before + dec(1));
    assert_eq!(w.ledger.registry().custodied_balance(), Decimal::ZERO);
    w.ledger.verify().unwrap();
}

#[test]
fn underpayment_changes_nothing() {
    let mut w = deploy();
    w.ledger.execute(w.deployer, eth_texas()).unwrap();
    let digest = w.ledger.registry().state_digest();

    let err = w
        .ledger
        .execute(w.buyer, mint(1, 50, Decimal::new(5, 1)))
        .unwrap_err();
    assert!(matches!(err, BoxOfficeError::InsufficientPayment { .. }));

    let reg = w.ledger.registry();
    assert_eq!(reg.get_occasion(OccasionId(1)).unwrap().remaining_seats, 100);
    assert!(!reg.has_bought(OccasionId(1), w.buyer));
    assert_eq!(reg.booked_seat(OccasionId(1), 50), None);
    assert_eq!(reg.custodied_balance(), Decimal::ZERO);
    assert_eq!(reg.state_digest(), digest);
    assert_eq!(w.ledger.balance(w.buyer), dec(100));
}

#[test]
fn stranger_cannot_list_or_withdraw() {
    let mut w = deploy();
    w.ledger.execute(w.deployer, eth_texas()).unwrap();
    w.ledger.execute(w.buyer, mint(1, 1, dec(1))).unwrap();

    let err = w.ledger.execute(w.buyer, eth_texas()).unwrap_err();
    assert_eq!(err, BoxOfficeError::Unauthorized { caller: w.buyer });
    assert_eq!(w.ledger.registry().total_occasions(), 1);

    let err = w.ledger.execute(w.buyer, Call::Withdraw).unwrap_err();
    assert_eq!(err, BoxOfficeError::Unauthorized { caller: w.buyer });
    assert_eq!(w.ledger.registry().custodied_balance(), dec(1));
    assert_eq!(w.ledger.balance(w.buyer), dec(99));
}

#[test]
fn mint_on_unknown_occasion_refunds_caller() {
    let mut w = deploy();
    let err = w.ledger.execute(w.buyer, mint(7, 1, dec(1))).unwrap_err();
    assert_eq!(err, BoxOfficeError::OccasionNotFound(OccasionId(7)));
    assert_eq!(w.ledger.balance(w.buyer), dec(100));
}

#[test]
fn overpayment_is_retained() {
    let mut w = deploy();
    w.ledger.execute(w.deployer, eth_texas()).unwrap();
    w.ledger.execute(w.buyer, mint(1, 9, dec(5))).unwrap();

    assert_eq!(w.ledger.registry().custodied_balance(), dec(5));
    assert_eq!(w.ledger.balance(w.buyer), dec(95));
    let ticket = w.ledger.registry().ticket(TicketId(1)).unwrap();
    assert_eq!(ticket.overpayment(dec(1)), dec(4));
}

#[test]
fn failed_payout_keeps_funds_in_custody() {
    let mut w = deploy();
    w.ledger.execute(w.deployer, eth_texas()).unwrap();
    for seat in 1..=3 {
        w.ledger.execute(w.buyer, mint(1, seat, dec(1))).unwrap();
    }
    let digest = w.ledger.registry().state_digest();
    w.ledger.reject_incoming(w.deployer);

    let err = w.ledger.execute(w.deployer, Call::Withdraw).unwrap_err();
    assert!(matches!(err, BoxOfficeError::TransferFailed { .. }));
    assert_eq!(w.ledger.registry().custodied_balance(), dec(3));
    assert_eq!(w.ledger.registry().state_digest(), digest);
    assert_eq!(w.ledger.balance(w.deployer), Decimal::ZERO);
    w.ledger.verify().unwrap();
}

#[test]
fn sold_out_occasion_refuses_further_mints() {
    let mut w = deploy();
    let listing = Call::AddOccasion(OccasionListing::dummy(dec(1), 2));
    w.ledger.execute(w.deployer, listing).unwrap();
    w.ledger.execute(w.buyer, mint(1, 1, dec(1))).unwrap();
    w.ledger.execute(w.buyer, mint(1, 2, dec(1))).unwrap();

    let err = w.ledger.execute(w.buyer, mint(1, 1, dec(1))).unwrap_err();
    assert_eq!(err, BoxOfficeError::SoldOut(OccasionId(1)));
    assert_eq!(w.ledger.registry().balance_of(w.buyer), 2);
}

#[test]
fn replayed_transaction_is_refused() {
    let mut w = deploy();
    w.ledger.execute(w.deployer, eth_texas()).unwrap();
    let tx = Transaction::new(w.buyer, mint(1, 10, dec(1)));

    w.ledger.submit(tx.clone()).unwrap();
    let err = w.ledger.submit(tx.clone()).unwrap_err();
    assert_eq!(err, BoxOfficeError::DuplicateTransaction(tx.id));
    assert_eq!(w.ledger.registry().total_supply(), 1);
    assert_eq!(w.ledger.balance(w.buyer), dec(99));
}

#[test]
fn identical_histories_produce_identical_digests() {
    let run = || {
        let mut w = deploy();
        w.ledger.execute(w.deployer, eth_texas()).unwrap();
        w.ledger.execute(w.buyer, mint(1, 3, dec(1))).unwrap();
        let _ = w.ledger.execute(w.buyer, mint(1, 3, dec(1)));
        w.ledger.execute(w.buyer, mint(1, 4, dec(2))).unwrap();
        w.ledger
            .receipts()
            .iter()
            .map(Receipt::digest_hex)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn receipts_serialize_to_json() {
    let mut w = deploy();
    w.ledger.execute(w.deployer, eth_texas()).unwrap();
    let _ = w.ledger.execute(w.buyer, mint(1, 0, dec(1)));

    let json = serde_json::to_value(w.ledger.receipts()).unwrap();
    let receipts = json.as_array().unwrap();
    assert_eq!(receipts.len(), 2);
    assert_eq!(receipts[0]["call"], "add_occasion");
    assert_eq!(receipts[1]["status"]["reverted"]["code"], 301);
    assert_eq!(
        receipts[1]["state_digest"].as_str().unwrap().len(),
        64,
        "digest is hex encoded"
    );
}
