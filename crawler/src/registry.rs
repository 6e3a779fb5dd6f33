use parking_lot::Mutex;
use std::collections::HashSet;
use textcore::NormalizedUrl;

/// Set of URLs a crawl has claimed. Shared by every crawl task.
#[derive(Debug, Default)]
pub struct VisitRegistry {
    seen: Mutex<HashSet<NormalizedUrl>>,
}

impl VisitRegistry {
    pub fn new() -> Self { Self::default() }

    /// Marks `url` visited. Returns true only for the caller that inserted it.
    pub fn try_mark(&self, url: &NormalizedUrl) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(url) {
            return false;
        }
        seen.insert(url.clone())
    }

    pub fn contains(&self, url: &NormalizedUrl) -> bool { self.seen.lock().contains(url) }

    pub fn len(&self) -> usize { self.seen.lock().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn snapshot(&self) -> Vec<NormalizedUrl> {
        let mut urls: Vec<_> = self.seen.lock().iter().cloned().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use textcore::normalize_url;

    #[test]
    fn marks_once() {
        let reg = VisitRegistry::new();
        let a = normalize_url("https://h.test/a").unwrap();
        assert!(reg.try_mark(&a));
        assert!(!reg.try_mark(&normalize_url("http://h.test/a/?q=1").unwrap()));
        assert!(reg.contains(&a));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn concurrent_marks_have_one_winner() {
        let reg = Arc::new(VisitRegistry::new());
        let url = normalize_url("https://h.test/race").unwrap();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let reg = reg.clone();
                let url = url.clone();
                thread::spawn(move || reg.try_mark(&url))
            })
            .collect();
        let winners = handles.into_iter().map(|h| h.join().unwrap()).filter(|won| *won).count();
        assert_eq!(winners, 1);
        assert_eq!(reg.snapshot(), vec![url]);
    }
}
