// ==============================================
// SERVICE SCENARIO TESTS (integration)
// ==============================================
//
// End-to-end behavior of each service through the public API, driven the
// way the HTTP layer drives them.

use tripkit::prelude::*;

// ==============================================
// Response Cache
// ==============================================

mod cache {
    use super::*;

    #[test]
    fn read_through_with_delete_on_write() {
        let cache: ResponseCache<String, String> = ResponseCache::new();
        let key = format!("city_{}", 42);

        // first read misses, handler fills the cache
        assert_eq!(cache.get(&key), None);
        cache.set(key.clone(), "Udaipur v1".into());

        // second read hits
        assert_eq!(cache.get(&key).as_deref(), Some("Udaipur v1"));

        // a write to the entity invalidates, next read misses again
        assert!(cache.delete(&key));
        assert_eq!(cache.get(&key), None);

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, stats.total_requests);
        assert_eq!((stats.hits, stats.misses), (1, 2));
        assert_eq!(stats.hit_rate, 33.33);
        assert_eq!(stats.current_size, 0);
    }

    #[test]
    fn counters_balance_after_many_lookups() {
        let cache = ResponseCache::new();
        for i in 0..100_u32 {
            if i % 3 == 0 {
                cache.set(i, i);
            }
        }
        for i in 0..250_u32 {
            cache.get(&i);
        }
        let stats = cache.stats();
        assert_eq!(stats.total_requests, 250);
        assert_eq!(stats.hits, 34);
        assert_eq!(stats.hits + stats.misses, stats.total_requests);
    }
}

// ==============================================
// Admission Queue
// ==============================================

mod admission {
    use super::*;

    #[test]
    fn consumer_drains_prefix_in_order() {
        for n in 0..=3 {
            let queue = AdmissionQueue::new();
            for payload in ["A", "B", "C"] {
                queue.enqueue(payload);
            }
            let drained: Vec<_> = (0..n)
                .filter_map(|_| queue.dequeue_next())
                .map(|item| item.payload)
                .collect();
            assert_eq!(drained, ["A", "B", "C"][..n].to_vec());
            assert_eq!(queue.status().pending_count, 3 - n);
            assert_eq!(queue.status().processed_count, n as u64);
        }
    }
}

// ==============================================
// Rating Ranker
// ==============================================

mod ranking {
    use super::*;

    fn seeded() -> RatingRanker<u32> {
        let ranker = RatingRanker::new();
        for (city, rating) in [85, 92, 78, 95, 88, 70, 90].into_iter().enumerate() {
            ranker.record_rating(city as u32 + 1, rating);
        }
        ranker
    }

    #[test]
    fn top_three_with_entity_association() {
        let top = seeded().top_k(3);
        let rows: Vec<_> = top.iter().map(|e| (e.rating, e.entity_id)).collect();
        assert_eq!(rows, vec![(95, 4), (92, 2), (90, 7)]);
    }

    #[test]
    fn average_of_distinct_values() {
        assert_eq!(seeded().stats().average, Some(85.43));
    }

    #[test]
    fn removed_value_leaves_inorder() {
        let ranker = seeded();
        assert!(ranker.remove_rating(78));
        assert!(!ranker.ratings_ascending().contains(&78));
        assert_eq!(ranker.ratings_ascending().len(), 6);
        ranker.check_invariants().unwrap();
    }
}

// ==============================================
// Activity Tracker
// ==============================================

mod tracker {
    use super::*;

    #[test]
    fn eleven_distinct_views_keep_ten() {
        let tracker = ActivityTracker::new();
        let cities = [
            "Agra", "Bhopal", "Chennai", "Delhi", "Goa", "Hampi", "Indore", "Jaipur", "Kochi",
            "Leh", "Mumbai",
        ];
        for (id, name) in cities.iter().enumerate() {
            tracker.record_view("traveler", id as u64, *name);
        }
        let recent = tracker.recent("traveler");
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().map(|v| v.label.as_str()), Some("Bhopal"));
        assert_eq!(recent.last().map(|v| v.label.as_str()), Some("Mumbai"));

        // re-viewing a present city moves it without growing the list
        tracker.record_view("traveler", 4, "Goa");
        let recent = tracker.recent("traveler");
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.last().map(|v| v.entity_id), Some(4));
        assert_eq!(recent.iter().filter(|v| v.entity_id == 4).count(), 1);
    }

    #[test]
    fn back_navigation_peeks_previous_page() {
        let tracker: ActivityTracker<u64> = ActivityTracker::new();
        for page in ["Home", "Cities", "Mumbai", "Book"] {
            tracker.track("traveler", page);
        }
        tracker.go_back("traveler");
        let previous = tracker.go_back("traveler").map(|v| v.page);
        assert_eq!(previous.as_deref(), Some("Cities"));
        assert_eq!(
            tracker.history("traveler", 1).first().map(|v| v.page.as_str()),
            Some("Cities")
        );
    }
}
