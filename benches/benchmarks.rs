use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdem_table::cards::{Card, Deck};
use holdem_table::eval::best_hand_rank;
use holdem_table::rng::{RandomSource, SeededRng};

fn seven_card_hands(count: usize) -> Vec<[Card; 7]> {
    let mut rng = SeededRng::new(7);
    let mut hands = Vec::with_capacity(count);
    for _ in 0..count {
        let mut deck = Deck::new();
        deck.shuffle(&mut rng).unwrap();
        let cards = deck.deal(7).unwrap();
        hands.push([cards[0], cards[1], cards[2], cards[3], cards[4], cards[5], cards[6]]);
    }
    hands
}

fn bench_best_hand_rank(c: &mut Criterion) {
    let hands = seven_card_hands(256);
    c.bench_function("best_hand_rank/7_cards", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(best_hand_rank(hand).unwrap());
            }
        })
    });
}

fn bench_deck_shuffle(c: &mut Criterion) {
    c.bench_function("deck/shuffle_52", |b| {
        let mut rng: Box<dyn RandomSource> = Box::new(SeededRng::new(1));
        b.iter(|| {
            let mut deck = Deck::new();
            deck.shuffle(rng.as_mut()).unwrap();
            black_box(&deck);
        })
    });
}

criterion_group!(benches, bench_best_hand_rank, bench_deck_shuffle);
criterion_main!(benches);
